//! Persistent key-value capability and the stores built on it.
//!
//! The timer core only ever needs `get`/`set` of a string blob. The SQLite
//! [`Database`] is the on-disk backend; [`MemoryStore`] keeps everything in
//! process.

mod config;
pub mod database;
pub mod memory;
pub mod session_store;

pub use config::{Config, NotificationsConfig, StorageConfig, TimerConfig};
pub use database::Database;
pub use memory::MemoryStore;
pub use session_store::{SessionStore, SESSIONS_KEY};

use std::path::PathBuf;

use crate::error::StorageError;

/// String-blob storage keyed by slot name.
///
/// Durability is best effort and a `set` is not atomic with respect to
/// other slots.
pub trait KeyValueStore {
    /// Read a slot; `Ok(None)` when it has never been written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the contents of a slot.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<K: KeyValueStore + ?Sized> KeyValueStore for Box<K> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Returns the focusroom data directory, creating it if needed.
///
/// `FOCUSROOM_DATA_DIR` wins when set. Otherwise this is
/// `~/.config/focusroom`, or `~/.config/focusroom-dev` with `FOCUSROOM_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let dir = match std::env::var_os("FOCUSROOM_DATA_DIR") {
        Some(custom) => PathBuf::from(custom),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("FOCUSROOM_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("focusroom-dev")
            } else {
                base_dir.join("focusroom")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
