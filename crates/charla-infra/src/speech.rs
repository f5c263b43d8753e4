//! OpenAI audio endpoints: transcription and speech synthesis.

use serde::{Deserialize, Serialize};

use charla_core::speech::{SpeechSynthesizer, Transcriber};
use charla_types::config::UpstreamConfig;
use charla_types::error::SpeechError;

use crate::openai_http::OpenAiHttp;

/// Client for `/audio/transcriptions` and `/audio/speech`.
pub struct OpenAiSpeechClient {
    http: OpenAiHttp,
    transcription_model: String,
    language: String,
    speech_model: String,
    voice: String,
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

#[derive(Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    voice: &'a str,
    input: &'a str,
}

impl OpenAiSpeechClient {
    pub fn new(http: OpenAiHttp, upstream: &UpstreamConfig) -> Self {
        Self {
            http,
            transcription_model: upstream.transcription_model.clone(),
            language: upstream.transcription_language.clone(),
            speech_model: upstream.speech_model.clone(),
            voice: upstream.speech_voice.clone(),
        }
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, SpeechError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(SpeechError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

impl Transcriber for OpenAiSpeechClient {
    async fn transcribe(
        &self,
        audio: Vec<u8>,
        file_name: &str,
        content_type: Option<&str>,
    ) -> Result<String, SpeechError> {
        let mut part = reqwest::multipart::Part::bytes(audio).file_name(file_name.to_string());
        if let Some(content_type) = content_type {
            part = part
                .mime_str(content_type)
                .map_err(|e| SpeechError::Request(format!("invalid content type: {e}")))?;
        }

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("model", self.transcription_model.clone())
            .text("language", self.language.clone());

        let response = self
            .http
            .post("/audio/transcriptions")
            .multipart(form)
            .send()
            .await
            .map_err(|e| SpeechError::Request(format!("HTTP request failed: {e}")))?;

        let raw = Self::check(response)
            .await?
            .text()
            .await
            .map_err(|e| SpeechError::Request(format!("failed to read response: {e}")))?;

        parse_transcription(&raw)
    }
}

impl SpeechSynthesizer for OpenAiSpeechClient {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        let body = SpeechRequest {
            model: &self.speech_model,
            voice: &self.voice,
            input: text,
        };

        let response = self
            .http
            .post("/audio/speech")
            .json(&body)
            .send()
            .await
            .map_err(|e| SpeechError::Request(format!("HTTP request failed: {e}")))?;

        let bytes = Self::check(response)
            .await?
            .bytes()
            .await
            .map_err(|e| SpeechError::Request(format!("failed to read audio: {e}")))?;

        Ok(bytes.to_vec())
    }
}

fn parse_transcription(raw: &str) -> Result<String, SpeechError> {
    serde_json::from_str::<TranscriptionResponse>(raw)
        .map(|r| r.text)
        .map_err(|e| SpeechError::Malformed(format!("failed to parse transcription: {e}")))
}
