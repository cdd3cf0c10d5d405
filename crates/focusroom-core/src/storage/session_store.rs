//! Whole-list persistence of completed sessions.
//!
//! The store never appends at the storage layer: every save round-trips the
//! full list as one JSON array in a single slot.

use tracing::{debug, warn};

use crate::error::Result;
use crate::session::Session;

use super::KeyValueStore;

/// Default slot name holding the session list.
pub const SESSIONS_KEY: &str = "sessions";

/// Data-access layer for the session list. No business logic lives here.
pub struct SessionStore<K> {
    kv: K,
    key: String,
}

impl<K: KeyValueStore> SessionStore<K> {
    pub fn new(kv: K) -> Self {
        Self::with_key(kv, SESSIONS_KEY)
    }

    pub fn with_key(kv: K, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    pub fn backend(&self) -> &K {
        &self.kv
    }

    /// Load every stored session in insertion order.
    ///
    /// An absent slot, a failed read or a malformed blob all read as
    /// "nothing recorded yet".
    pub fn load_all(&self) -> Vec<Session> {
        let raw = match self.kv.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "no stored sessions");
                return Vec::new();
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to read sessions, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Session>>(&raw) {
            Ok(sessions) => sessions,
            Err(e) => {
                warn!(key = %self.key, error = %e, "stored sessions are malformed, starting empty");
                Vec::new()
            }
        }
    }

    /// Replace the stored list with `sessions`.
    ///
    /// # Errors
    /// Returns an error if serialization or the storage write fails.
    pub fn save_all(&self, sessions: &[Session]) -> Result<()> {
        let json = serde_json::to_string(sessions)?;
        self.kv.set(&self.key, &json)?;
        debug!(key = %self.key, count = sessions.len(), "sessions saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Database, MemoryStore};
    use chrono::{TimeZone, Utc};

    fn sample() -> Vec<Session> {
        vec![
            Session::new("Study", 1500, Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap(), 0),
            Session::new("Work", 300, Utc.with_ymd_and_hms(2026, 1, 5, 11, 0, 0).unwrap(), 2),
            Session::new("", 60, Utc.with_ymd_and_hms(2026, 1, 6, 8, 15, 0).unwrap(), 1),
        ]
    }

    #[test]
    fn load_after_save_returns_same_list() {
        let store = SessionStore::new(MemoryStore::new());
        let sessions = sample();
        store.save_all(&sessions).unwrap();
        assert_eq!(store.load_all(), sessions);
    }

    #[test]
    fn sqlite_backend_round_trips() {
        let store = SessionStore::new(Database::open_memory().unwrap());
        let sessions = sample();
        store.save_all(&sessions).unwrap();
        assert_eq!(store.load_all(), sessions);
    }

    #[test]
    fn missing_slot_loads_empty() {
        let store = SessionStore::new(MemoryStore::new());
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn corrupt_blob_loads_empty() {
        let store = SessionStore::new(MemoryStore::with_slot(SESSIONS_KEY, "{not json"));
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn null_fields_do_not_discard_history() {
        let raw = r#"[
            {"id":"1","category":"Work","durationSeconds":600,"createdAt":"2026-01-05T09:00:00Z","distractCount":1},
            {"id":"2","category":null,"durationSeconds":120,"createdAt":"2026-01-05T10:00:00Z","distractCount":null}
        ]"#;
        let store = SessionStore::new(MemoryStore::with_slot(SESSIONS_KEY, raw));
        let sessions = store.load_all();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[1].category_label(), "Other");
        assert_eq!(sessions[1].distract_count, 0);
    }

    #[test]
    fn save_replaces_previous_contents() {
        let store = SessionStore::new(MemoryStore::new());
        let sessions = sample();
        store.save_all(&sessions).unwrap();
        store.save_all(&sessions[..1]).unwrap();
        assert_eq!(store.load_all().len(), 1);
    }

    #[test]
    fn custom_slot_name_is_used() {
        let store = SessionStore::with_key(MemoryStore::new(), "focus_sessions");
        store.save_all(&sample()).unwrap();
        assert!(store.backend().get("focus_sessions").unwrap().is_some());
        assert!(store.backend().get(SESSIONS_KEY).unwrap().is_none());
    }
}
