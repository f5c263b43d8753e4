//! BoxEmbedder -- object-safe dynamic dispatch wrapper for Embedder.
//!
//! 1. Define an object-safe `EmbedderDyn` trait with boxed futures
//! 2. Blanket-impl `EmbedderDyn` for all `T: Embedder`
//! 3. `BoxEmbedder` wraps `Box<dyn EmbedderDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use charla_types::error::EmbeddingError;

use super::embedder::Embedder;

/// Object-safe version of [`Embedder`] with boxed futures.
pub trait EmbedderDyn: Send + Sync {
    fn embed_boxed<'a>(
        &'a self,
        texts: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Vec<f32>>, EmbeddingError>> + Send + 'a>>;

    fn model_name_dyn(&self) -> &str;
}

impl<T: Embedder> EmbedderDyn for T {
    fn embed_boxed<'a>(
        &'a self,
        texts: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Vec<f32>>, EmbeddingError>> + Send + 'a>> {
        Box::pin(self.embed(texts))
    }

    fn model_name_dyn(&self) -> &str {
        self.model_name()
    }
}

/// Type-erased embedder.
///
/// Lets the retriever and the corpus builder hold any `Embedder` (the real
/// HTTP client or a counting mock) without being generic.
pub struct BoxEmbedder {
    inner: Box<dyn EmbedderDyn + Send + Sync>,
}

impl BoxEmbedder {
    /// Wrap a concrete `Embedder` in a type-erased box.
    pub fn new<T: Embedder + 'static>(embedder: T) -> Self {
        Self {
            inner: Box::new(embedder),
        }
    }

    /// Embed one or more texts into vectors.
    pub async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.inner.embed_boxed(texts).await
    }

    /// Embed a single text.
    pub async fn embed_one(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let input = [text.to_string()];
        self.embed(&input)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| EmbeddingError::Malformed("no vector returned".to_string()))
    }

    /// The model name used for embeddings.
    pub fn model_name(&self) -> &str {
        self.inner.model_name_dyn()
    }
}
