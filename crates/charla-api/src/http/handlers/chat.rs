//! Chat endpoint.
//!
//! POST /api/chat
//!
//! Answers with `{"text": ...}` for canned replies, otherwise streams the
//! model output as Server-Sent Events: one `data:` frame per line of each
//! delta, terminated by `data: [DONE]`. Failures before the first frame are
//! JSON errors; failures after it are in-band frames.

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures_util::StreamExt;
use tracing::Instrument;

use charla_core::chat::service::ChatOutcome;
use charla_observe::genai_attrs::{
    GEN_AI_CONVERSATION_ID, GEN_AI_OPERATION_NAME, GEN_AI_PROVIDER_NAME, GEN_AI_REQUEST_MODEL,
    OP_CHAT,
};
use charla_types::chat::ChatRequest;

use crate::http::error::AppError;
use crate::state::AppState;

/// SSE keep-alive comment interval.
const KEEP_ALIVE: Duration = Duration::from_secs(15);

/// POST /api/chat
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(body) = payload?;
    let service = &state.chat_service;
    let session = body.session_id.map(|id| id.to_string()).unwrap_or_default();
    let span = tracing::info_span!(
        "chat",
        { GEN_AI_OPERATION_NAME } = OP_CHAT,
        { GEN_AI_PROVIDER_NAME } = service.provider_name(),
        { GEN_AI_REQUEST_MODEL } = service.model(),
        { GEN_AI_CONVERSATION_ID } = %session,
        messages = body.messages.len(),
    );

    let outcome = service.respond(body).instrument(span).await?;

    match outcome {
        ChatOutcome::Canned { reply, .. } => Ok(Json(reply).into_response()),
        ChatOutcome::Streaming(frames) => {
            let events = frames.map(|frame| Ok::<_, Infallible>(Event::default().data(frame)));
            Ok(Sse::new(events)
                .keep_alive(KeepAlive::new().interval(KEEP_ALIVE))
                .into_response())
        }
    }
}
