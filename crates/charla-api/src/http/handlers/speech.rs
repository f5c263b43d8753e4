//! Text-to-speech endpoint.
//!
//! POST /api/tts `{"text": ...}` -> `audio/mpeg`

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::Instrument;

use charla_core::speech::SpeechSynthesizer;
use charla_observe::genai_attrs::{GEN_AI_OPERATION_NAME, OP_SPEECH};

use crate::http::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SpeechRequest {
    #[serde(default)]
    pub text: String,
}

/// POST /api/tts
pub async fn synthesize(
    State(state): State<AppState>,
    payload: Result<Json<SpeechRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(body) = payload?;
    if body.text.trim().is_empty() {
        return Err(AppError::Validation("text must not be empty".to_string()));
    }

    let span = tracing::info_span!(
        "speech",
        { GEN_AI_OPERATION_NAME } = OP_SPEECH,
        chars = body.text.chars().count(),
    );
    let audio = state
        .speech
        .synthesize(&body.text)
        .instrument(span)
        .await?;

    Ok(([(header::CONTENT_TYPE, "audio/mpeg")], audio).into_response())
}
