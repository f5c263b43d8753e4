//! Keyed in-memory session history.
//!
//! Each session id maps to the last complete history recorded for it.
//! Values are cloned on read so no `DashMap` guard outlives a call.
//! The store holds at most `max_sessions` entries; recording past the cap
//! evicts the least recently recorded session.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use charla_types::chat::SessionSnapshot;
use charla_types::llm::Message;

/// Cap used by [`SessionStore::new`].
pub const DEFAULT_MAX_SESSIONS: usize = 1000;

#[derive(Debug)]
struct Entry {
    /// Recording order, used for eviction.
    seq: u64,
    snapshot: SessionSnapshot,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<DashMap<Uuid, Entry>>,
    next_seq: Arc<AtomicU64>,
    max_sessions: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_limit(DEFAULT_MAX_SESSIONS)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding at most `max_sessions` histories (minimum 1).
    pub fn with_limit(max_sessions: usize) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            next_seq: Arc::new(AtomicU64::new(0)),
            max_sessions: max_sessions.max(1),
        }
    }

    pub fn max_sessions(&self) -> usize {
        self.max_sessions
    }

    /// Replace the recorded history for `id`, evicting the oldest sessions
    /// if the store is over its cap.
    pub fn record(&self, id: Uuid, messages: Vec<Message>) {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.inner.insert(
            id,
            Entry {
                seq,
                snapshot: SessionSnapshot {
                    id,
                    messages,
                    updated_at: Utc::now(),
                },
            },
        );

        while self.inner.len() > self.max_sessions {
            let oldest = self
                .inner
                .iter()
                .filter(|e| *e.key() != id)
                .min_by_key(|e| e.value().seq)
                .map(|e| *e.key());
            let Some(oldest) = oldest else { break };
            self.inner.remove(&oldest);
            tracing::debug!(session_id = %oldest, "evicted oldest session");
        }
    }

    pub fn get(&self, id: &Uuid) -> Option<SessionSnapshot> {
        self.inner.get(id).map(|r| r.value().snapshot.clone())
    }

    /// Forget a session. Returns whether it existed.
    pub fn remove(&self, id: &Uuid) -> bool {
        self.inner.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
