//! Immutable chunk collection and the keyword-gated retriever.
//!
//! `ChunkStore` is built once during startup and shared behind an `Arc`;
//! nothing can mutate it afterwards, so concurrent requests read it without
//! locking.

use std::sync::Arc;

use charla_types::error::EmbeddingError;
use charla_types::retrieval::{EmbeddedChunk, ScoredChunk};

use super::box_embedder::BoxEmbedder;
use super::similarity::top_k;

/// Read-only collection of embedded chunks.
#[derive(Debug, Default)]
pub struct ChunkStore {
    chunks: Vec<EmbeddedChunk>,
}

impl ChunkStore {
    pub fn new(chunks: Vec<EmbeddedChunk>) -> Self {
        Self { chunks }
    }

    pub fn chunks(&self) -> &[EmbeddedChunk] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Best `k` chunks for a query embedding, highest score first.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<ScoredChunk> {
        top_k(&self.chunks, query, k)
    }
}

/// Decides whether a query needs document context and fetches it.
pub struct Retriever {
    store: Arc<ChunkStore>,
    embedder: Arc<BoxEmbedder>,
    /// Lowercased trigger keywords.
    keywords: Vec<String>,
    top_k: usize,
}

impl Retriever {
    pub fn new(
        store: Arc<ChunkStore>,
        embedder: Arc<BoxEmbedder>,
        keywords: &[String],
        top_k: usize,
    ) -> Self {
        Self {
            store,
            embedder,
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            top_k,
        }
    }

    pub fn store(&self) -> &Arc<ChunkStore> {
        &self.store
    }

    /// True when the query contains at least one trigger keyword (case-insensitive).
    pub fn is_triggered(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.keywords.iter().any(|k| query.contains(k.as_str()))
    }

    /// Retrieved context for `query`, or `None` when retrieval does not apply.
    ///
    /// The embedder is only called when the query is triggered and the store
    /// has chunks. An empty store yields `None` rather than an error.
    pub async fn context_for(&self, query: &str) -> Result<Option<String>, EmbeddingError> {
        if !self.is_triggered(query) {
            return Ok(None);
        }
        if self.store.is_empty() {
            tracing::debug!("retrieval triggered but chunk store is empty");
            return Ok(None);
        }

        let query_vector = self.embedder.embed_one(query).await?;
        let hits = self.store.search(&query_vector, self.top_k);
        tracing::debug!(
            hits = hits.len(),
            best_score = hits.first().map(|h| h.score).unwrap_or(0.0),
            "retrieved document context"
        );

        let context = hits
            .iter()
            .map(|h| h.chunk.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        Ok(if context.is_empty() { None } else { Some(context) })
    }
}
