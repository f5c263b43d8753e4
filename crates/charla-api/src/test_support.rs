//! Fixtures shared by the router and client tests.

use std::path::Path;
use std::sync::Arc;

use futures_util::stream;
use secrecy::SecretString;

use charla_core::chat::service::ChatService;
use charla_core::chat::session::SessionStore;
use charla_core::llm::{EventStream, LlmProvider};
use charla_core::retrieval::{BoxEmbedder, ChunkStore, Embedder, Retriever};
use charla_infra::openai_http::OpenAiHttp;
use charla_infra::speech::OpenAiSpeechClient;
use charla_types::config::CharlaConfig;
use charla_types::error::EmbeddingError;
use charla_types::llm::{CompletionRequest, LlmError, StreamEvent};

use crate::state::AppState;

/// Replays a fixed script; `None` fails the call before any event.
pub struct ScriptedProvider {
    pub script: Option<Vec<StreamEvent>>,
}

impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn stream(&self, _request: CompletionRequest) -> EventStream {
        match &self.script {
            Some(events) => Box::pin(stream::iter(events.clone().into_iter().map(Ok))),
            None => Box::pin(stream::once(async { Err(LlmError::AuthenticationFailed) })),
        }
    }
}

pub struct ZeroEmbedder;

impl Embedder for ZeroEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts.iter().map(|_| vec![0.0, 0.0]).collect())
    }

    fn model_name(&self) -> &str {
        "zero"
    }
}

/// App state over an empty corpus and a scripted provider.
pub fn state_with(script: Option<Vec<StreamEvent>>, data_dir: &Path) -> AppState {
    let config = CharlaConfig::default();
    let retriever = Retriever::new(
        Arc::new(ChunkStore::default()),
        Arc::new(BoxEmbedder::new(ZeroEmbedder)),
        &config.retrieval.keywords,
        config.retrieval.top_k,
    );
    let chat_service = ChatService::from_config(
        &config,
        Arc::new(ScriptedProvider { script }),
        retriever,
        SessionStore::new(),
    );
    // Never contacted by these tests.
    let http = OpenAiHttp::new("http://127.0.0.1:9", SecretString::from("sk-test"), None)
        .expect("client builds");
    let speech = OpenAiSpeechClient::new(http, &config.upstream);
    AppState::new(config, chat_service, speech, data_dir.to_path_buf())
}
