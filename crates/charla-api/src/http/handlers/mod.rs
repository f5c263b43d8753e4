//! Route handlers.

pub mod chat;
pub mod session;
pub mod speech;
pub mod voice;
