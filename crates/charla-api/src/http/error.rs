//! Application error type mapping to HTTP status codes and `{"error": ...}` bodies.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use charla_types::error::{ChatError, SessionError, SpeechError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Chat pipeline failed before streaming started.
    Chat(ChatError),
    /// Transcription or synthesis failed.
    Speech(SpeechError),
    /// Session lookup errors.
    Session(SessionError),
    /// Validation error.
    Validation(String),
    /// Generic internal error.
    Internal(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl From<SpeechError> for AppError {
    fn from(e: SpeechError) -> Self {
        AppError::Speech(e)
    }
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        AppError::Session(e)
    }
}

/// Malformed, mistyped or wrongly labelled JSON bodies are all a 400.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Chat(_) | AppError::Speech(_) => StatusCode::BAD_GATEWAY,
            AppError::Session(SessionError::NotFound) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Chat(e) => e.to_string(),
            AppError::Speech(e) => e.to_string(),
            AppError::Session(e) => e.to_string(),
            AppError::Validation(msg) | AppError::Internal(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %message, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %message, "request rejected");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charla_types::llm::LlmError;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::from(ChatError::Upstream(LlmError::AuthenticationFailed)).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::from(SpeechError::Request("down".into())).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::from(SessionError::NotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Validation("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Internal("oops".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
