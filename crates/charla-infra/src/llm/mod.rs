//! LLM provider implementations.
//!
//! Provides the OpenAI-compatible streaming provider and a factory that
//! builds it from the upstream configuration.

pub mod openai_compat;

use std::sync::Arc;

use charla_core::llm::provider::LlmProvider;
use charla_types::config::UpstreamConfig;
use secrecy::SecretString;

use self::openai_compat::config::OpenAiCompatConfig;
use self::openai_compat::OpenAiCompatibleProvider;

/// Create the chat provider for the configured upstream.
///
/// Any base URL speaking the OpenAI chat-completions protocol works; the
/// provider name is derived from it for logs and span attributes.
pub fn create_provider(upstream: &UpstreamConfig, api_key: SecretString) -> Arc<dyn LlmProvider> {
    let config = OpenAiCompatConfig::from_upstream(upstream, api_key);
    tracing::debug!(
        provider = %config.provider_name,
        base_url = %config.base_url,
        model = %config.model,
        "creating chat provider"
    );
    Arc::new(OpenAiCompatibleProvider::new(config))
}
