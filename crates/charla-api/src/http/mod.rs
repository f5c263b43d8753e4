//! HTTP layer for Charla.
//!
//! Axum router serving `/api/chat` (SSE), the speech endpoints, session
//! lookups, `/health` and the static web client.

pub mod error;
pub mod handlers;
pub mod router;
