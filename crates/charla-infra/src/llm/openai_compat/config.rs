//! Configuration for the OpenAI-compatible chat provider.

use charla_types::config::UpstreamConfig;
use secrecy::SecretString;

/// Base URL of the hosted OpenAI API.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Configuration for an OpenAI-compatible LLM provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "openai").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.openai.com/v1").
    pub base_url: String,
    /// API key for authentication.
    pub api_key: SecretString,
    /// Model identifier (e.g., "gpt-4o-mini").
    pub model: String,
}

impl OpenAiCompatConfig {
    /// Build from the `[upstream]` section of the config file.
    pub fn from_upstream(upstream: &UpstreamConfig, api_key: SecretString) -> Self {
        Self {
            provider_name: provider_name_for(&upstream.base_url),
            base_url: upstream.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: upstream.chat_model.clone(),
        }
    }
}

/// OpenAI default configuration.
pub fn openai_defaults(api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "openai".into(),
        base_url: OPENAI_BASE_URL.into(),
        api_key,
        model: model.into(),
    }
}

/// Derive a short provider name from a base URL.
///
/// The hosted OpenAI endpoint is "openai"; anything else is named after its
/// host so logs distinguish proxies and local servers.
pub fn provider_name_for(base_url: &str) -> String {
    let host = base_url
        .split("://")
        .nth(1)
        .unwrap_or(base_url)
        .split(['/', ':'])
        .next()
        .unwrap_or_default();

    if host.is_empty() || host == "api.openai.com" {
        "openai".to_string()
    } else {
        host.to_string()
    }
}
