//! LLM request and streaming types for Charla.
//!
//! These types model what is sent to an upstream chat-completion API and the
//! normalized event shape its streaming response is decoded into.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a message in an LLM conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(MessageRole::System),
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single message in an LLM conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Request to an LLM provider for a completion.
///
/// `messages` is sent verbatim and in order; the system instruction is
/// already the first entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(default)]
    pub stream: bool,
}

/// Events emitted during a streaming LLM response.
///
/// This is the only shape the relay ever sees; provider-specific chunk
/// formats are decoded into it at the infra boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum StreamEvent {
    /// Incremental answer text.
    TextDelta(String),

    /// Incremental refusal text (the model declined to answer).
    RefusalDelta(String),

    /// An error-typed event delivered in-band by the upstream stream.
    Error(String),

    /// The stream has completed.
    Done,
}

/// Errors from LLM provider operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("stream error: {0}")]
    Stream(String),

    #[error("rate limited")]
    RateLimited,

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_roundtrip() {
        for role in [MessageRole::System, MessageRole::User, MessageRole::Assistant] {
            let s = role.to_string();
            let parsed: MessageRole = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_message_role_rejects_unknown() {
        let err = "tool".parse::<MessageRole>().unwrap_err();
        assert!(err.contains("tool"));
    }

    #[test]
    fn test_message_deserializes_from_browser_shape() {
        let msg: Message = serde_json::from_str(r#"{"role":"user","content":"hola"}"#).unwrap();
        assert_eq!(msg, Message::user("hola"));
    }

    #[test]
    fn test_stream_event_serde_shape() {
        let json = serde_json::to_string(&StreamEvent::TextDelta("Hel".into())).unwrap();
        assert_eq!(json, r#"{"type":"text_delta","data":"Hel"}"#);
        let done = serde_json::to_string(&StreamEvent::Done).unwrap();
        assert_eq!(done, r#"{"type":"done"}"#);
    }

    #[test]
    fn test_llm_error_display() {
        let err = LlmError::Provider {
            message: "connection reset".into(),
        };
        assert_eq!(err.to_string(), "provider error: connection reset");
    }
}
