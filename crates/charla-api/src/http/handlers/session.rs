//! Session history handlers.
//!
//! - GET    /api/sessions/{id} - Recorded history for a session
//! - DELETE /api/sessions/{id} - Forget a session

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use charla_types::chat::SessionSnapshot;
use charla_types::error::SessionError;

use crate::http::error::AppError;
use crate::state::AppState;

/// Parse a UUID from a path parameter, returning a 400 error on invalid format.
fn parse_uuid(s: &str) -> Result<Uuid, AppError> {
    s.parse::<Uuid>()
        .map_err(|_| AppError::Validation(format!("Invalid UUID: {s}")))
}

/// GET /api/sessions/{id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let id = parse_uuid(&id)?;
    state
        .chat_service
        .sessions()
        .get(&id)
        .map(Json)
        .ok_or(AppError::Session(SessionError::NotFound))
}

/// DELETE /api/sessions/{id}
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_uuid(&id)?;
    if state.chat_service.sessions().remove(&id) {
        tracing::info!(session_id = %id, "session deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Session(SessionError::NotFound))
    }
}
