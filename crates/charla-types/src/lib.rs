//! Shared domain types for Charla.
//!
//! Messages, upstream stream events, embedded corpus chunks, configuration
//! and the error enums shared across the workspace.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod retrieval;
