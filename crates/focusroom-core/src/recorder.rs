//! Turns elapsed focus time into persisted session records.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::session::{Category, Session};
use crate::storage::{KeyValueStore, SessionStore};

/// Seam between the timer engine and whatever keeps session records.
pub trait SessionSink {
    /// Record `elapsed_secs` of focus time.
    ///
    /// Returns the created session, or `None` when nothing was recorded
    /// (zero elapsed time).
    fn record(&mut self, elapsed_secs: u64, category: &Category, distract_count: u32)
        -> Option<Session>;
}

/// Append-only recorder backed by a [`SessionStore`].
///
/// Owns the in-memory session list. The list is loaded once at construction
/// and is authoritative for the rest of the process, even when a later
/// write to storage fails.
pub struct SessionRecorder<K> {
    store: SessionStore<K>,
    sessions: Vec<Session>,
}

impl<K: KeyValueStore> SessionRecorder<K> {
    pub fn new(store: SessionStore<K>) -> Self {
        let sessions = store.load_all();
        Self { store, sessions }
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn store(&self) -> &SessionStore<K> {
        &self.store
    }

    /// Record with an explicit creation time.
    pub fn record_at(
        &mut self,
        elapsed_secs: u64,
        category: &Category,
        distract_count: u32,
        now: DateTime<Utc>,
    ) -> Option<Session> {
        if elapsed_secs == 0 {
            return None;
        }

        let session = Session::new(category.label(), elapsed_secs, now, distract_count);
        self.sessions.push(session.clone());
        info!(
            id = %session.id,
            category = %session.category,
            duration_secs = session.duration_seconds,
            distractions = session.distract_count,
            "session recorded"
        );

        if let Err(e) = self.store.save_all(&self.sessions) {
            warn!(error = %e, "failed to persist sessions; keeping in-memory copy");
        }
        Some(session)
    }
}

impl<K: KeyValueStore> SessionSink for SessionRecorder<K> {
    fn record(
        &mut self,
        elapsed_secs: u64,
        category: &Category,
        distract_count: u32,
    ) -> Option<Session> {
        self.record_at(elapsed_secs, category, distract_count, Utc::now())
    }
}
