//! OpenAI SSE stream to [`StreamEvent`] adapter.
//!
//! Maps `async-openai`'s [`ChatCompletionResponseStream`] chunks to the
//! provider-agnostic [`StreamEvent`] enum defined in `charla-types`.

use futures_util::StreamExt;

use async_openai::types::chat::{ChatCompletionResponseStream, FinishReason};

use charla_core::llm::provider::EventStream;
use charla_types::llm::{LlmError, StreamEvent};

/// Message reported when the upstream stops a response on its content filter.
pub const CONTENT_FILTER_MESSAGE: &str = "response stopped by the upstream content filter";

/// Map an async-openai [`ChatCompletionResponseStream`] to a stream of [`StreamEvent`]s.
///
/// Empty content fragments (the role-only opening chunk) are skipped. A
/// `content_filter` finish reason becomes an in-band [`StreamEvent::Error`].
/// The stream always ends with [`StreamEvent::Done`] unless a transport
/// error cuts it short.
pub fn map_openai_stream(stream: ChatCompletionResponseStream) -> EventStream {
    Box::pin(async_stream::try_stream! {
        let mut stream = stream;

        while let Some(result) = stream.next().await {
            let chunk = result.map_err(|e| LlmError::Stream(e.to_string()))?;

            for choice in chunk.choices {
                if let Some(text) = choice.delta.content.filter(|t| !t.is_empty()) {
                    yield StreamEvent::TextDelta(text);
                }
                if let Some(refusal) = choice.delta.refusal.filter(|t| !t.is_empty()) {
                    yield StreamEvent::RefusalDelta(refusal);
                }
                if matches!(choice.finish_reason, Some(FinishReason::ContentFilter)) {
                    yield StreamEvent::Error(CONTENT_FILTER_MESSAGE.to_string());
                }
            }
        }

        yield StreamEvent::Done;
    })
}
