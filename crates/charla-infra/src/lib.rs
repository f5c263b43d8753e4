//! Infrastructure layer for Charla.
//!
//! Implementations of the collaborator traits defined in `charla-core`:
//! an OpenAI-compatible streaming chat provider, HTTP embedding and speech
//! clients, the document corpus builder with its JSON cache file, and the
//! `config.toml` loader.

pub mod config;
pub mod corpus;
pub mod embedding;
pub mod filesystem;
pub mod llm;
pub mod openai_http;
pub mod speech;
