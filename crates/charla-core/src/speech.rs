//! Speech collaborator traits.
//!
//! Transcription backs `POST /api/voz`, synthesis backs `POST /api/tts`.
//! Implementations live in charla-infra.

use charla_types::error::SpeechError;

/// Speech-to-text.
pub trait Transcriber: Send + Sync {
    /// Transcribe an uploaded audio clip.
    ///
    /// `file_name` and `content_type` are forwarded so the provider can
    /// detect the container format.
    fn transcribe(
        &self,
        audio: Vec<u8>,
        file_name: &str,
        content_type: Option<&str>,
    ) -> impl std::future::Future<Output = Result<String, SpeechError>> + Send;
}

/// Text-to-speech.
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text`, returning encoded audio bytes (MP3).
    fn synthesize(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<Vec<u8>, SpeechError>> + Send;
}
