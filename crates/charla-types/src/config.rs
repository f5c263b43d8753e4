//! Global configuration types for Charla.
//!
//! `CharlaConfig` represents the top-level `config.toml` in the data
//! directory. Every field has a default, so an empty file (or no file at all)
//! yields a working configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharlaConfig {
    /// Instruction sent as the first system message of every upstream call.
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    #[serde(default)]
    pub upstream: UpstreamConfig,

    #[serde(default)]
    pub retrieval: RetrievalConfig,

    #[serde(default)]
    pub corpus: CorpusConfig,

    #[serde(default)]
    pub server: ServerConfig,

    /// Keyword-triggered canned replies, checked in order.
    #[serde(default = "default_intents")]
    pub intents: Vec<IntentRule>,
}

impl Default for CharlaConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            upstream: UpstreamConfig::default(),
            retrieval: RetrievalConfig::default(),
            corpus: CorpusConfig::default(),
            server: ServerConfig::default(),
            intents: default_intents(),
        }
    }
}

fn default_system_prompt() -> String {
    "Eres un asistente amable y claro.".to_string()
}

/// Upstream OpenAI-compatible API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub chat_model: String,
    pub embedding_model: String,
    pub transcription_model: String,
    /// Spoken language hint for transcription (ISO-639-1).
    pub transcription_language: String,
    pub speech_model: String,
    pub speech_voice: String,
    /// Optional request timeout for embedding and speech calls.
    pub timeout_secs: Option<u64>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            chat_model: "gpt-4o-mini".to_string(),
            embedding_model: "text-embedding-3-small".to_string(),
            transcription_model: "whisper-1".to_string(),
            transcription_language: "es".to_string(),
            speech_model: "tts-1".to_string(),
            speech_voice: "alloy".to_string(),
            timeout_secs: None,
        }
    }
}

/// When and how document context is retrieved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Retrieval runs only if the query contains one of these (case-insensitive).
    pub keywords: Vec<String>,
    pub top_k: usize,
    /// Prefix of the system message that carries retrieved text.
    pub context_header: String,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            keywords: [
                "arquitectura",
                "gótica",
                "veterinaria",
                "vet",
                "animales",
                "league of legends",
                "lol",
                "tft",
                "builds",
                "campeones",
            ]
            .iter()
            .map(|k| k.to_string())
            .collect(),
            top_k: 3,
            context_header: "Información relevante de documentos:".to_string(),
        }
    }
}

/// Source documents and the embedding cache file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Directory of `.txt` / `.md` documents, relative to the data dir.
    pub docs_dir: String,
    /// Embedding cache file, relative to the data dir.
    pub cache_file: String,
    /// Maximum characters per chunk.
    pub chunk_chars: usize,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            docs_dir: "docs".to_string(),
            cache_file: "vectorStore.json".to_string(),
            chunk_chars: 500,
        }
    }
}

/// HTTP server settings that are not CLI flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Static client assets, served when the directory exists.
    pub web_dir: String,
    /// Most sessions kept in memory; the least recently recorded is evicted.
    pub max_sessions: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            web_dir: "public".to_string(),
            max_sessions: 1000,
        }
    }
}

/// A canned reply returned when the last user message contains a keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentRule {
    pub name: String,
    pub keywords: Vec<String>,
    pub reply: String,
}

fn default_intents() -> Vec<IntentRule> {
    vec![
        IntentRule {
            name: "saluda".to_string(),
            keywords: vec!["saludame".to_string(), "hola".to_string()],
            reply: "¡Hola Pablo! Encantado de saludarte 😊".to_string(),
        },
        IntentRule {
            name: "tiempo".to_string(),
            keywords: vec!["tiempo".to_string(), "clima".to_string()],
            reply: "El tiempo en Badajoz es soleado con 25°C. Si me equivoco, mira por la ventana 😉"
                .to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_values() {
        let config = CharlaConfig::default();
        assert_eq!(config.system_prompt, "Eres un asistente amable y claro.");
        assert_eq!(config.upstream.chat_model, "gpt-4o-mini");
        assert_eq!(config.upstream.embedding_model, "text-embedding-3-small");
        assert_eq!(config.retrieval.top_k, 3);
        assert_eq!(config.corpus.chunk_chars, 500);
        assert_eq!(config.intents.len(), 2);
        assert_eq!(config.server.max_sessions, 1000);
    }

    #[test]
    fn test_config_deserialize_empty_uses_defaults() {
        let config: CharlaConfig = toml::from_str("").unwrap();
        assert_eq!(config.retrieval.keywords.len(), 10);
        assert_eq!(config.intents[0].name, "saluda");
        assert_eq!(config.corpus.cache_file, "vectorStore.json");
        assert!(config.upstream.timeout_secs.is_none());
    }

    #[test]
    fn test_config_deserialize_partial_sections() {
        let toml_str = r#"
system_prompt = "Be brief."

[upstream]
chat_model = "gpt-4o"
timeout_secs = 30

[retrieval]
keywords = ["rust"]

[[intents]]
name = "ping"
keywords = ["ping"]
reply = "pong"
"#;
        let config: CharlaConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.system_prompt, "Be brief.");
        assert_eq!(config.upstream.chat_model, "gpt-4o");
        // Unset fields in a present section keep their defaults.
        assert_eq!(config.upstream.embedding_model, "text-embedding-3-small");
        assert_eq!(config.upstream.timeout_secs, Some(30));
        assert_eq!(config.retrieval.keywords, vec!["rust".to_string()]);
        assert_eq!(config.retrieval.top_k, 3);
        assert_eq!(config.intents.len(), 1);
        assert_eq!(config.intents[0].reply, "pong");
    }
}
