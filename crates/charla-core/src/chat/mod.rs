//! Chat request pipeline.
//!
//! - `intent`: keyword-triggered canned replies
//! - `prompt`: upstream message assembly
//! - `service`: the per-request orchestrator
//! - `session`: keyed in-memory history store

pub mod intent;
pub mod prompt;
pub mod service;
pub mod session;
