//! OpenAI embeddings client.

use serde::{Deserialize, Serialize};

use charla_core::retrieval::embedder::Embedder;
use charla_types::error::EmbeddingError;

use crate::openai_http::OpenAiHttp;

/// Calls `POST {base_url}/embeddings`.
pub struct OpenAiEmbedder {
    http: OpenAiHttp,
    model: String,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

impl OpenAiEmbedder {
    pub fn new(http: OpenAiHttp, model: impl Into<String>) -> Self {
        Self {
            http,
            model: model.into(),
        }
    }
}

impl Embedder for OpenAiEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let body = EmbeddingRequest {
            model: &self.model,
            input: texts,
        };

        let response = self
            .http
            .post("/embeddings")
            .json(&body)
            .send()
            .await
            .map_err(|e| EmbeddingError::Request(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Request(format!("HTTP {status}: {error_body}")));
        }

        let raw = response
            .text()
            .await
            .map_err(|e| EmbeddingError::Request(format!("failed to read response: {e}")))?;

        parse_embedding_response(&raw, texts.len())
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Decode an embeddings response, ordering vectors by their `index`.
fn parse_embedding_response(raw: &str, expected: usize) -> Result<Vec<Vec<f32>>, EmbeddingError> {
    let mut parsed: EmbeddingResponse = serde_json::from_str(raw)
        .map_err(|e| EmbeddingError::Malformed(format!("failed to parse response: {e}")))?;

    if parsed.data.len() != expected {
        return Err(EmbeddingError::Malformed(format!(
            "expected {expected} vectors, got {}",
            parsed.data.len()
        )));
    }

    parsed.data.sort_by_key(|d| d.index);
    Ok(parsed.data.into_iter().map(|d| d.embedding).collect())
}
