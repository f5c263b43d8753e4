//! Document retrieval for prompt augmentation.
//!
//! A brute-force cosine-similarity scan over a fixed, immutable collection of
//! embedded chunks, gated by a keyword trigger list.

pub mod box_embedder;
pub mod embedder;
pub mod similarity;
pub mod store;

pub use box_embedder::BoxEmbedder;
pub use embedder::Embedder;
pub use similarity::{cosine_similarity, top_k};
pub use store::{ChunkStore, Retriever};
