//! Embedded corpus chunk types.

use serde::{Deserialize, Serialize};

/// A slice of a source document together with its embedding vector.
///
/// Serialized as-is into the embedding cache file, so the field names are
/// part of the on-disk format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedChunk {
    pub id: String,
    pub text: String,
    pub embedding: Vec<f32>,
    pub source: String,
}

/// A chunk paired with its similarity score against a query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredChunk {
    pub chunk: EmbeddedChunk,
    pub score: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_chunk_cache_format() {
        let json = r#"{"id":"guia.txt-0","text":"hola","embedding":[0.5,1.0],"source":"guia.txt"}"#;
        let chunk: EmbeddedChunk = serde_json::from_str(json).unwrap();
        assert_eq!(chunk.id, "guia.txt-0");
        assert_eq!(chunk.embedding, vec![0.5, 1.0]);
        assert_eq!(chunk.source, "guia.txt");
    }
}
