//! Embedding cache file (`vectorStore.json`).
//!
//! A JSON array of [`EmbeddedChunk`] records.

use std::path::Path;

use charla_types::error::CorpusError;
use charla_types::retrieval::EmbeddedChunk;

/// Read the cache. `Ok(None)` when the file does not exist.
pub async fn load_cache(path: &Path) -> Result<Option<Vec<EmbeddedChunk>>, CorpusError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(io_error(path, err)),
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| CorpusError::Cache(e.to_string()))
}

/// Write the cache, creating parent directories as needed.
pub async fn save_cache(path: &Path, chunks: &[EmbeddedChunk]) -> Result<(), CorpusError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| io_error(parent, e))?;
    }

    let json = serde_json::to_vec(chunks).map_err(|e| CorpusError::Cache(e.to_string()))?;
    tokio::fs::write(path, json)
        .await
        .map_err(|e| io_error(path, e))
}

pub(crate) fn io_error(path: &Path, err: std::io::Error) -> CorpusError {
    CorpusError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn chunk(id: &str) -> EmbeddedChunk {
        EmbeddedChunk {
            id: id.to_string(),
            text: "texto".to_string(),
            embedding: vec![0.25, 0.5],
            source: "guia.txt".to_string(),
        }
    }

    #[tokio::test]
    async fn test_missing_cache_is_none() {
        let tmp = TempDir::new().unwrap();
        let loaded = load_cache(&tmp.path().join("vectorStore.json")).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("vectorStore.json");
        save_cache(&path, &[chunk("guia.txt-0"), chunk("guia.txt-480")])
            .await
            .unwrap();

        let loaded = load_cache(&path).await.unwrap().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].id, "guia.txt-480");
    }

    #[tokio::test]
    async fn test_corrupt_cache_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("vectorStore.json");
        tokio::fs::write(&path, "{ not an array").await.unwrap();

        let err = load_cache(&path).await.unwrap_err();
        assert!(matches!(err, CorpusError::Cache(_)));
    }
}
