//! LLM provider abstraction.
//!
//! - `LlmProvider`: streaming chat-completion collaborator
//! - `EventStream`: the boxed stream type every provider returns

pub mod provider;

pub use provider::{EventStream, LlmProvider};
