//! Corpus ingestion: documents on disk to an in-memory [`ChunkStore`].
//!
//! On startup the embedding cache is loaded when present; otherwise every
//! `.txt`/`.md`/`.docx` file in the documents directory is chunked, embedded and
//! the result persisted to the cache file.

pub mod cache;
pub mod chunker;
pub mod docx;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use charla_core::retrieval::box_embedder::BoxEmbedder;
use charla_core::retrieval::store::ChunkStore;
use charla_types::config::CorpusConfig;
use charla_types::error::CorpusError;
use charla_types::retrieval::EmbeddedChunk;

use self::cache::{io_error, load_cache, save_cache};
use self::chunker::{chunk_document, is_document, is_docx, DocumentChunk};
use self::docx::extract_docx_text;

/// Texts sent per embeddings request.
const EMBED_BATCH_SIZE: usize = 64;

/// Builds the chunk store from the documents directory and cache file.
pub struct CorpusBuilder {
    docs_dir: PathBuf,
    cache_path: PathBuf,
    chunk_chars: usize,
    embedder: Arc<BoxEmbedder>,
}

impl CorpusBuilder {
    /// Relative paths in `config` are resolved against `data_dir`.
    pub fn new(data_dir: &Path, config: &CorpusConfig, embedder: Arc<BoxEmbedder>) -> Self {
        Self {
            docs_dir: data_dir.join(&config.docs_dir),
            cache_path: data_dir.join(&config.cache_file),
            chunk_chars: config.chunk_chars,
            embedder,
        }
    }

    pub fn docs_dir(&self) -> &Path {
        &self.docs_dir
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    /// Load the cache if present, otherwise build from documents.
    ///
    /// An unreadable or corrupt cache is logged and rebuilt.
    pub async fn load_or_build(&self) -> Result<ChunkStore, CorpusError> {
        match load_cache(&self.cache_path).await {
            Ok(Some(chunks)) => {
                tracing::info!(
                    chunks = chunks.len(),
                    path = %self.cache_path.display(),
                    "loaded embedding cache"
                );
                return Ok(ChunkStore::new(chunks));
            }
            Ok(None) => {
                tracing::info!(path = %self.cache_path.display(), "no embedding cache, building");
            }
            Err(e) => {
                tracing::warn!(error = %e, "embedding cache unusable, rebuilding");
            }
        }

        self.rebuild().await
    }

    /// Chunk and embed every document, then overwrite the cache.
    ///
    /// With no documents the store is empty and no cache is written.
    pub async fn rebuild(&self) -> Result<ChunkStore, CorpusError> {
        let documents = self.read_documents().await?;

        let pieces: Vec<DocumentChunk> = documents
            .iter()
            .flat_map(|(name, content)| chunk_document(name, content, self.chunk_chars))
            .collect();

        if pieces.is_empty() {
            tracing::warn!(
                docs_dir = %self.docs_dir.display(),
                "no document content to index; retrieval will add no context"
            );
            return Ok(ChunkStore::default());
        }

        let chunks = self.embed_pieces(pieces).await?;
        save_cache(&self.cache_path, &chunks).await?;

        tracing::info!(
            documents = documents.len(),
            chunks = chunks.len(),
            model = self.embedder.model_name(),
            path = %self.cache_path.display(),
            "embedding cache written"
        );
        Ok(ChunkStore::new(chunks))
    }

    async fn embed_pieces(
        &self,
        pieces: Vec<DocumentChunk>,
    ) -> Result<Vec<EmbeddedChunk>, CorpusError> {
        let mut chunks = Vec::with_capacity(pieces.len());

        for batch in pieces.chunks(EMBED_BATCH_SIZE) {
            let texts: Vec<String> = batch.iter().map(|p| p.text.clone()).collect();
            let vectors = self.embedder.embed(&texts).await?;

            for (piece, embedding) in batch.iter().zip(vectors) {
                chunks.push(EmbeddedChunk {
                    id: piece.id.clone(),
                    text: piece.text.clone(),
                    embedding,
                    source: piece.source.clone(),
                });
            }
            tracing::debug!(done = chunks.len(), total = pieces.len(), "embedded batch");
        }

        Ok(chunks)
    }

    /// `(file_name, content)` for every document, sorted by file name.
    async fn read_documents(&self) -> Result<Vec<(String, String)>, CorpusError> {
        let mut entries = match tokio::fs::read_dir(&self.docs_dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(docs_dir = %self.docs_dir.display(), "documents directory not found");
                return Ok(Vec::new());
            }
            Err(err) => return Err(io_error(&self.docs_dir, err)),
        };

        let mut documents = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| io_error(&self.docs_dir, e))?
        {
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()).map(str::to_owned) else {
                continue;
            };
            if !path.is_file() || !is_document(&name) {
                continue;
            }

            let content = if is_docx(&name) {
                let bytes = tokio::fs::read(&path)
                    .await
                    .map_err(|e| io_error(&path, e))?;
                extract_docx_text(&bytes).map_err(|message| CorpusError::Document {
                    path: path.display().to_string(),
                    message,
                })?
            } else {
                tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|e| io_error(&path, e))?
            };
            documents.push((name, content));
        }

        documents.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(documents)
    }
}
