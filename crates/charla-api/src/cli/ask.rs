//! `charla ask`: one-shot terminal client for a running server.
//!
//! Posts a single user message to `/api/chat` and prints the answer as it
//! streams, reassembling the `data:` fragments into spaced prose.

use std::io::Write;

use anyhow::Context;
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use uuid::Uuid;

use charla_core::reassembly::{Reassembler, SseLineDecoder};
use charla_types::chat::{ChatReply, ChatRequest};
use charla_types::llm::Message;

/// Run the `ask` command.
pub async fn ask(url: &str, message: &str, session: Option<Uuid>, json: bool) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout();
    let text = fetch_reply(url, message, session, |piece| {
        if !json {
            print!("{piece}");
            let _ = stdout.flush();
        }
    })
    .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&ChatReply { text })?);
    } else {
        println!();
    }
    Ok(())
}

/// Send `message` and return the full reply text.
///
/// `on_piece` sees each piece of display text as it is appended; a canned
/// JSON reply arrives as a single piece.
pub async fn fetch_reply(
    url: &str,
    message: &str,
    session: Option<Uuid>,
    mut on_piece: impl FnMut(&str),
) -> anyhow::Result<String> {
    let endpoint = format!("{}/api/chat", url.trim_end_matches('/'));
    let request = ChatRequest {
        messages: vec![Message::user(message)],
        session_id: session,
    };

    let response = reqwest::Client::new()
        .post(&endpoint)
        .json(&request)
        .send()
        .await
        .with_context(|| format!("failed to reach {endpoint}"))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let reason = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v["error"].as_str().map(str::to_owned))
            .unwrap_or(body);
        anyhow::bail!("server returned {status}: {reason}");
    }

    let is_stream = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("text/event-stream"));

    if !is_stream {
        let reply: ChatReply = response.json().await.context("malformed reply")?;
        on_piece(&reply.text);
        return Ok(reply.text);
    }

    let mut decoder = SseLineDecoder::new();
    let mut reassembler = Reassembler::new();
    let mut body = response.bytes_stream();

    while let Some(chunk) = body.next().await {
        let chunk = chunk.context("stream interrupted")?;
        for payload in decoder.feed(&chunk) {
            if let Some(piece) = reassembler.push(&payload) {
                on_piece(&piece);
            }
        }
        if reassembler.is_finished() {
            break;
        }
    }
    if let Some(piece) = decoder.finish().and_then(|p| reassembler.push(&p)) {
        on_piece(&piece);
    }

    if !reassembler.is_finished() {
        tracing::warn!("stream ended without a terminator");
    }
    Ok(reassembler.into_text())
}
