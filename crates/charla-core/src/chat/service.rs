//! Per-request chat orchestration.
//!
//! ```text
//! Received -> CannedReply                                   (JSON reply)
//!          -> RetrievalCheck -> PromptAssembled -> Streaming -> Done | Failed
//! ```
//!
//! Everything up to and including the first upstream event happens before the
//! caller commits to a streaming response, so a failure there is returned as
//! an error instead of an in-band frame.

use std::sync::Arc;

use futures_util::StreamExt;

use charla_types::chat::{ChatReply, ChatRequest};
use charla_types::config::CharlaConfig;
use charla_types::error::ChatError;
use charla_types::llm::{CompletionRequest, Message};

use crate::chat::intent::IntentTable;
use crate::chat::prompt::PromptAssembler;
use crate::chat::session::SessionStore;
use crate::llm::{EventStream, LlmProvider};
use crate::relay::{self, FrameStream, RelaySummary};
use crate::retrieval::Retriever;

/// How a chat request is answered.
pub enum ChatOutcome {
    /// A canned reply; no upstream call was made.
    Canned { intent: String, reply: ChatReply },
    /// A live upstream stream, already past its first event.
    Streaming(FrameStream),
}

/// The chat orchestrator shared by all requests.
pub struct ChatService {
    provider: Arc<dyn LlmProvider>,
    retriever: Retriever,
    intents: IntentTable,
    prompt: PromptAssembler,
    sessions: SessionStore,
    model: String,
}

impl ChatService {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        retriever: Retriever,
        intents: IntentTable,
        prompt: PromptAssembler,
        sessions: SessionStore,
        model: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            retriever,
            intents,
            prompt,
            sessions,
            model: model.into(),
        }
    }

    /// Wire a service from configuration.
    pub fn from_config(
        config: &CharlaConfig,
        provider: Arc<dyn LlmProvider>,
        retriever: Retriever,
        sessions: SessionStore,
    ) -> Self {
        Self::new(
            provider,
            retriever,
            IntentTable::new(&config.intents),
            PromptAssembler::new(
                config.system_prompt.clone(),
                config.retrieval.context_header.clone(),
            ),
            sessions,
            config.upstream.chat_model.clone(),
        )
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Number of chunks available to retrieval.
    pub fn chunk_count(&self) -> usize {
        self.retriever.store().len()
    }

    /// Answer one chat request.
    pub async fn respond(&self, request: ChatRequest) -> Result<ChatOutcome, ChatError> {
        let question = request.last_user_message().to_string();

        if let Some(rule) = self.intents.match_message(&question) {
            tracing::info!(intent = %rule.name, "answering with canned reply");
            let reply = ChatReply {
                text: rule.reply.clone(),
            };
            if let Some(id) = request.session_id {
                let mut history = request.messages;
                history.push(Message::assistant(reply.text.clone()));
                self.sessions.record(id, history);
            }
            return Ok(ChatOutcome::Canned {
                intent: rule.name.clone(),
                reply,
            });
        }

        let context = self.retriever.context_for(&question).await?;
        let messages = self.prompt.assemble(&request.messages, context.as_deref());
        tracing::debug!(
            messages = messages.len(),
            with_context = context.is_some(),
            "prompt assembled"
        );

        let mut upstream = self.provider.stream(CompletionRequest {
            model: self.model.clone(),
            messages,
            stream: true,
        });

        // Prime the stream: a provider that cannot be reached fails here,
        // while the response can still be a JSON error.
        let first = match upstream.next().await {
            Some(Err(e)) => {
                tracing::error!(error = %e, "upstream call failed before streaming");
                return Err(ChatError::Upstream(e));
            }
            first => first,
        };
        let upstream: EventStream = Box::pin(futures_util::stream::iter(first).chain(upstream));

        let sessions = self.sessions.clone();
        let session_id = request.session_id;
        let history = request.messages;
        let frames = relay::relay(upstream, move |summary: RelaySummary| {
            tracing::info!(
                frames = summary.frames,
                chars = summary.text.chars().count(),
                clean = summary.clean,
                "stream finished"
            );
            if let (Some(id), true) = (session_id, summary.clean) {
                let mut history = history;
                history.push(Message::assistant(summary.text));
                sessions.record(id, history);
            }
        });

        Ok(ChatOutcome::Streaming(frames))
    }
}
