//! Key-value persistence capability
//!
//! The session store reads and writes through the [`KeyValueStore`] trait so
//! the backing medium can be swapped: `sled` on disk for the real client, an
//! in-memory map for tests and ephemeral runs.
//!
//! Every operation is best-effort. A failed or corrupted read surfaces as
//! `None` and a failed write is swallowed (and logged); callers fall back to
//! defaults rather than propagating storage errors.

use crate::error::{BuzzBotError, Result};
use directories::ProjectDirs;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

/// Best-effort string key-value storage
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value
    fn put(&self, key: &str, value: &str);

    /// Remove the value stored under `key`, if any
    fn remove(&self, key: &str);
}

/// Sled-backed store in the platform data directory
///
/// The database location can be overridden with the `BUZZBOT_STORE_PATH`
/// environment variable, which makes it easy to point the binary at a test
/// database without touching the user's application data.
pub struct SledStore {
    db: sled::Db,
}

impl SledStore {
    /// Open the store at the default location
    ///
    /// Honors `BUZZBOT_STORE_PATH` when set; otherwise resolves the
    /// platform data directory and opens `store` inside it.
    pub fn open_default() -> Result<Self> {
        if let Ok(override_path) = std::env::var("BUZZBOT_STORE_PATH") {
            return Self::open(override_path);
        }

        let proj_dirs = ProjectDirs::from("com", "buzzbot", "buzzbot")
            .ok_or_else(|| BuzzBotError::Storage("could not determine data directory".into()))?;
        Self::open(proj_dirs.data_dir().join("store"))
    }

    /// Open the store at a specific path, creating parent directories
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use buzzbot::store::kv::SledStore;
    ///
    /// let store = SledStore::open("/tmp/buzzbot-test-store").unwrap();
    /// ```
    pub fn open<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                BuzzBotError::Storage(format!("failed to create store directory: {}", e))
            })?;
        }
        let db = sled::open(&path)
            .map_err(|e| BuzzBotError::Storage(format!("failed to open store: {}", e)))?;
        tracing::debug!("Opened session store at {}", path.display());
        Ok(Self { db })
    }
}

impl KeyValueStore for SledStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.db.get(key) {
            Ok(Some(value)) => String::from_utf8(value.to_vec()).ok(),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Store read failed for key {}: {}", key, e);
                None
            }
        }
    }

    fn put(&self, key: &str, value: &str) {
        if let Err(e) = self.db.insert(key, value.as_bytes()) {
            tracing::warn!("Store write failed for key {}: {}", key, e);
        }
        if let Err(e) = self.db.flush() {
            tracing::warn!("Store flush failed: {}", e);
        }
    }

    fn remove(&self, key: &str) {
        if let Err(e) = self.db.remove(key) {
            tracing::warn!("Store remove failed for key {}: {}", key, e);
        }
    }
}

/// In-memory store used by tests and as a no-persistence fallback
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .ok()
            .and_then(|map| map.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) {
        if let Ok(mut map) = self.entries.write() {
            map.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut map) = self.entries.write() {
            map.remove(key);
        }
    }
}
