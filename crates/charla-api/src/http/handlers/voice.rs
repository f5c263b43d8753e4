//! Speech-to-text endpoint.
//!
//! POST /api/voz (multipart, field `audio`) -> `{"text": ...}`

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::Instrument;

use charla_core::speech::Transcriber;
use charla_observe::genai_attrs::{GEN_AI_OPERATION_NAME, OP_TRANSCRIBE};

use crate::http::error::AppError;
use crate::state::AppState;

/// Name of the multipart field carrying the recording.
const AUDIO_FIELD: &str = "audio";

/// File name used when the upload does not carry one.
const DEFAULT_FILE_NAME: &str = "audio.webm";

#[derive(Debug, Serialize)]
pub struct Transcript {
    pub text: String,
}

/// POST /api/voz
pub async fn transcribe(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Transcript>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some(AUDIO_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or(DEFAULT_FILE_NAME).to_string();
        let content_type = field.content_type().map(str::to_owned);
        let audio = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read audio: {e}")))?;

        if audio.is_empty() {
            return Err(AppError::Validation("audio field is empty".to_string()));
        }

        let span = tracing::info_span!(
            "transcribe",
            { GEN_AI_OPERATION_NAME } = OP_TRANSCRIBE,
            bytes = audio.len(),
        );
        let text = state
            .speech
            .transcribe(audio.to_vec(), &file_name, content_type.as_deref())
            .instrument(span)
            .await?;

        return Ok(Json(Transcript { text }));
    }

    Err(AppError::Validation("missing audio field".to_string()))
}
