//! Cosine similarity and top-K selection.

use std::cmp::Ordering;

use charla_types::retrieval::{EmbeddedChunk, ScoredChunk};

/// Cosine similarity of two vectors: `dot(a, b) / (|a| * |b|)`.
///
/// Returns 0.0 when either magnitude is zero, when the inputs are empty, or
/// when their dimensions differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b.iter()) {
        let x64 = f64::from(x);
        let y64 = f64::from(y);
        dot += x64 * y64;
        norm_a += x64 * x64;
        norm_b += y64 * y64;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        return 0.0;
    }
    (dot / denom) as f32
}

/// Score every chunk against `query` and return the best `k`, highest first.
///
/// Full scan, O(n). The sort is stable, so equal scores keep collection order.
pub fn top_k(chunks: &[EmbeddedChunk], query: &[f32], k: usize) -> Vec<ScoredChunk> {
    let mut scored: Vec<ScoredChunk> = chunks
        .iter()
        .map(|chunk| ScoredChunk {
            score: cosine_similarity(query, &chunk.embedding),
            chunk: chunk.clone(),
        })
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.truncate(k);
    scored
}
