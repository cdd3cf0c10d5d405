pub mod config;
pub mod sessions;
pub mod stats;
pub mod timer;

use focusroom_core::{Config, Database, SessionStore};

/// Open the on-disk session store named by the configuration.
pub fn open_store(config: &Config) -> Result<SessionStore<Database>, Box<dyn std::error::Error>> {
    let db = Database::open()?;
    Ok(SessionStore::with_key(db, config.storage.sessions_key.clone()))
}
