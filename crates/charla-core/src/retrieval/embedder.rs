//! Embedder trait for text-to-vector conversion.
//!
//! Implementations (e.g., OpenAI embeddings) live in charla-infra.

use charla_types::error::EmbeddingError;

/// Trait for converting text into embedding vectors.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait Embedder: Send + Sync {
    /// Embed one or more texts into vectors.
    ///
    /// Returns one vector per input text, in input order.
    fn embed(
        &self,
        texts: &[String],
    ) -> impl std::future::Future<Output = Result<Vec<Vec<f32>>, EmbeddingError>> + Send;

    /// The model name used for embeddings (e.g., "text-embedding-3-small").
    fn model_name(&self) -> &str;
}
