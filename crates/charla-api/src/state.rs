//! Application state wiring all services together.
//!
//! `AppState::init` runs the whole startup sequence (config, credentials,
//! corpus) before the server binds its listener, so every request sees a
//! fully built chunk store.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use secrecy::{ExposeSecret, SecretString};

use charla_core::chat::service::ChatService;
use charla_core::chat::session::SessionStore;
use charla_core::retrieval::{BoxEmbedder, ChunkStore, Retriever};
use charla_infra::config::{apply_env_overrides, load_config};
use charla_infra::corpus::CorpusBuilder;
use charla_infra::embedding::OpenAiEmbedder;
use charla_infra::llm::create_provider;
use charla_infra::openai_http::OpenAiHttp;
use charla_infra::speech::OpenAiSpeechClient;
use charla_types::config::CharlaConfig;

/// Shared application state used by the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ChatService>,
    pub speech: Arc<OpenAiSpeechClient>,
    pub config: Arc<CharlaConfig>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Load config, build the chunk store and wire the services.
    ///
    /// A corpus that cannot be built is logged and replaced by an empty
    /// store; the server still answers, just without document context.
    pub async fn init(data_dir: &Path) -> anyhow::Result<Self> {
        let config = load_settings(data_dir).await;
        let api_key = api_key_from_env()?;
        let http = upstream_http(&config, SecretString::from(api_key.expose_secret()))?;

        let embedder = Arc::new(BoxEmbedder::new(OpenAiEmbedder::new(
            http.clone(),
            config.upstream.embedding_model.clone(),
        )));

        let store = match CorpusBuilder::new(data_dir, &config.corpus, embedder.clone())
            .load_or_build()
            .await
        {
            Ok(store) => store,
            Err(e) => {
                tracing::error!(error = %e, "corpus unavailable, continuing without document context");
                ChunkStore::default()
            }
        };

        let retriever = Retriever::new(
            Arc::new(store),
            embedder,
            &config.retrieval.keywords,
            config.retrieval.top_k,
        );
        let provider = create_provider(&config.upstream, api_key);
        let sessions = SessionStore::with_limit(config.server.max_sessions);
        let chat_service = ChatService::from_config(&config, provider, retriever, sessions);
        let speech = OpenAiSpeechClient::new(http, &config.upstream);

        Ok(Self::new(config, chat_service, speech, data_dir.to_path_buf()))
    }

    pub fn new(
        config: CharlaConfig,
        chat_service: ChatService,
        speech: OpenAiSpeechClient,
        data_dir: PathBuf,
    ) -> Self {
        Self {
            chat_service: Arc::new(chat_service),
            speech: Arc::new(speech),
            config: Arc::new(config),
            data_dir,
        }
    }

    /// Directory of the static web client.
    pub fn web_dir(&self) -> PathBuf {
        self.data_dir.join(&self.config.server.web_dir)
    }
}

/// `config.toml` from the data directory with environment overrides applied.
pub async fn load_settings(data_dir: &Path) -> CharlaConfig {
    apply_env_overrides(load_config(data_dir).await)
}

/// The upstream API key from `OPENAI_API_KEY`.
pub fn api_key_from_env() -> anyhow::Result<SecretString> {
    let key = std::env::var("OPENAI_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty())
        .context("OPENAI_API_KEY is not set")?;
    Ok(SecretString::from(key))
}

/// HTTP client for the embeddings and audio endpoints.
pub fn upstream_http(config: &CharlaConfig, api_key: SecretString) -> anyhow::Result<OpenAiHttp> {
    let timeout = config.upstream.timeout_secs.map(Duration::from_secs);
    OpenAiHttp::new(&config.upstream.base_url, api_key, timeout)
        .context("failed to build upstream HTTP client")
}
