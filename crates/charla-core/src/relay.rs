//! SSE relay: upstream stream events to outbound `data:` frame payloads.
//!
//! The relay yields payload strings only; the HTTP layer wraps each one in a
//! `data: <payload>\n\n` frame. Framing rules:
//!
//! - Text and refusal deltas: `\r` removed, empty deltas skipped, split on
//!   `\n`, one frame per line. Every line but the last carries the
//!   [`LINE_BREAK`] sentinel so the client can restore the newline.
//! - In-band upstream errors: one frame with the message, stream continues.
//! - Transport errors after the first frame: one error frame, then stop.
//! - Always ends with [`DONE`], whether upstream sent `Done` or just ended.
//!
//! Frames leave in exactly the order the deltas arrived.

use std::pin::Pin;

use futures_util::{Stream, StreamExt};

use charla_types::llm::StreamEvent;

use crate::llm::EventStream;

/// In-band newline marker inside a frame payload.
pub const LINE_BREAK: &str = "###";

/// Payload of the terminating frame.
pub const DONE: &str = "[DONE]";

/// Boxed stream of frame payloads.
pub type FrameStream = Pin<Box<dyn Stream<Item = String> + Send + 'static>>;

/// What the relay saw by the time it stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelaySummary {
    /// Concatenated delta text as received (newlines intact).
    pub text: String,
    /// False if any error, in-band or transport, was relayed.
    pub clean: bool,
    /// Frames emitted, including the terminator.
    pub frames: usize,
}

/// Split one text delta into frame payloads.
pub fn delta_frames(delta: &str) -> Vec<String> {
    let text = delta.replace('\r', "");
    if text.is_empty() {
        return Vec::new();
    }

    let lines: Vec<&str> = text.split('\n').collect();
    let last = lines.len() - 1;
    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            if i < last {
                format!("{line}{LINE_BREAK}")
            } else {
                line.to_string()
            }
        })
        .filter(|frame| !frame.is_empty())
        .collect()
}

/// Payload for an error message; always a single frame.
pub fn error_frame(message: &str) -> String {
    message.replace(['\r', '\n'], " ")
}

/// Logs when a relay is dropped before reaching its terminator, which only
/// happens when the client went away and the response body was discarded.
struct AbandonGuard {
    finished: bool,
    frames: usize,
}

impl Drop for AbandonGuard {
    fn drop(&mut self) {
        if !self.finished {
            tracing::info!(
                frames_sent = self.frames,
                "client disconnected mid-stream, abandoning upstream"
            );
        }
    }
}

/// Relay an upstream event stream as frame payloads.
///
/// `on_finish` runs once, just before the terminator is yielded. It does not
/// run if the consumer drops the stream early.
pub fn relay<F>(upstream: EventStream, on_finish: F) -> FrameStream
where
    F: FnOnce(RelaySummary) + Send + 'static,
{
    Box::pin(async_stream::stream! {
        let mut upstream = upstream;
        let mut guard = AbandonGuard { finished: false, frames: 0 };
        let mut text = String::new();
        let mut clean = true;

        while let Some(item) = upstream.next().await {
            match item {
                Ok(StreamEvent::TextDelta(delta)) | Ok(StreamEvent::RefusalDelta(delta)) => {
                    text.push_str(&delta);
                    for frame in delta_frames(&delta) {
                        guard.frames += 1;
                        yield frame;
                    }
                }
                Ok(StreamEvent::Error(message)) => {
                    tracing::warn!(error = %message, "upstream reported an in-band error");
                    clean = false;
                    guard.frames += 1;
                    yield error_frame(&message);
                }
                Ok(StreamEvent::Done) => break,
                Err(e) => {
                    tracing::error!(error = %e, "upstream stream failed after streaming began");
                    clean = false;
                    guard.frames += 1;
                    yield error_frame(&e.to_string());
                    break;
                }
            }
        }

        guard.frames += 1;
        guard.finished = true;
        on_finish(RelaySummary {
            text,
            clean,
            frames: guard.frames,
        });

        yield DONE.to_string();
    })
}
