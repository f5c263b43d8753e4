//! Business logic and collaborator traits for Charla.
//!
//! This crate defines the "ports" (LLM provider, embedder, speech) that the
//! infrastructure layer implements, plus the pure logic of the chat pipeline:
//! SSE relay framing, client-side fragment reassembly, similarity retrieval
//! and the request orchestrator. It depends only on `charla-types` -- never
//! on `charla-infra` or any HTTP crate.

pub mod chat;
pub mod llm;
pub mod reassembly;
pub mod relay;
pub mod retrieval;
pub mod speech;
