//! LlmProvider trait definition.
//!
//! Only the streaming path is modelled: the chat pipeline never asks for a
//! buffered completion. The stream is boxed so providers can be held as
//! `Arc<dyn LlmProvider>` and swapped for mocks in tests.

use std::pin::Pin;

use futures_util::Stream;

use charla_types::llm::{CompletionRequest, LlmError, StreamEvent};

/// Boxed stream of upstream events.
///
/// `Err` items are transport or protocol failures; `Ok(StreamEvent::Error)`
/// is an error the upstream itself reported in-band.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>>;

/// Trait for streaming chat-completion backends.
///
/// Implementations live in charla-infra (e.g., `OpenAiCompatibleProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a streaming completion request. Returns a lazy stream of events.
    ///
    /// Failing to reach the provider must surface as the first item of the
    /// stream, not as a panic or an empty stream.
    fn stream(&self, request: CompletionRequest) -> EventStream;
}
