//! Configuration loader for Charla.
//!
//! Reads `config.toml` from the data directory and deserializes it into
//! [`CharlaConfig`]. Falls back to defaults when the file is missing or
//! malformed, then applies environment overrides.

use std::path::Path;

use charla_types::config::CharlaConfig;

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`CharlaConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_config(data_dir: &Path) -> CharlaConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return CharlaConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return CharlaConfig::default();
        }
    };

    match toml::from_str::<CharlaConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            CharlaConfig::default()
        }
    }
}

/// Apply environment overrides on top of a loaded config.
///
/// `SYSTEM_PROMPT` replaces the system instruction and `OPENAI_BASE_URL`
/// the upstream base URL, when set and non-empty.
pub fn apply_env_overrides(mut config: CharlaConfig) -> CharlaConfig {
    if let Some(prompt) = non_empty_env("SYSTEM_PROMPT") {
        config.system_prompt = prompt;
    }
    if let Some(base_url) = non_empty_env("OPENAI_BASE_URL") {
        config.upstream.base_url = base_url;
    }
    config
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
