//! Chat request, reply and session types for Charla.
//!
//! These are the shapes exchanged over `/api/chat` and the per-session
//! history records kept by the server.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use crate::llm::{Message, MessageRole};

/// Body of `POST /api/chat`.
///
/// `messages` is the full conversation history in order. When `session_id`
/// is present the server also records the exchange under that key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<Uuid>,
}

impl ChatRequest {
    /// Content of the most recent user-authored message, or `""` if none.
    pub fn last_user_message(&self) -> &str {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User)
            .map(|m| m.content.as_str())
            .unwrap_or("")
    }
}

/// A complete, non-streamed chat answer (`{"text": "..."}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub text: String,
}

/// Snapshot of a recorded session history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub messages: Vec<Message>,
    pub updated_at: DateTime<Utc>,
}
