//! Local session store
//!
//! Persists session metadata and per-session message ledgers through the
//! injected key-value capability. The registry (all [`SessionMeta`] records,
//! in insertion order) lives under a single versioned key; each ledger lives
//! under a derived per-session key.
//!
//! Reads fail soft: absent or malformed data yields empty defaults. Writes
//! are best-effort; the store offers no durability guarantee beyond "valid
//! until the underlying storage is cleared or exceeds capacity". The only
//! operation that can fail is [`SessionStore::create_session`], which talks
//! to the backend to obtain a new session id.

use crate::api::BackendClient;
use crate::error::Result;
use chrono::Utc;
use std::sync::Arc;

pub mod kv;
pub mod types;

pub use kv::{KeyValueStore, MemoryStore, SledStore};
pub use types::{Role, SessionMeta, StoredMessage, VideoStatus};

/// Registry key; the suffix versions the serialized layout
const REGISTRY_KEY: &str = "sessions_v1";

/// Prefix for per-session ledger keys
const LEDGER_PREFIX: &str = "msgs_v1:";

/// Session metadata registry plus message ledgers
pub struct SessionStore {
    kv: Arc<dyn KeyValueStore>,
    backend: Arc<dyn BackendClient>,
}

impl SessionStore {
    /// Create a store over a key-value capability and a backend client
    pub fn new(kv: Arc<dyn KeyValueStore>, backend: Arc<dyn BackendClient>) -> Self {
        Self { kv, backend }
    }

    fn ledger_key(id: &str) -> String {
        format!("{}{}", LEDGER_PREFIX, id)
    }

    /// Registry in insertion order, failing soft on malformed data
    fn read_registry(&self) -> Vec<SessionMeta> {
        let Some(raw) = self.kv.get(REGISTRY_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!("Malformed session registry, starting empty: {}", e);
                Vec::new()
            }
        }
    }

    fn write_registry(&self, list: &[SessionMeta]) {
        match serde_json::to_string(list) {
            Ok(raw) => self.kv.put(REGISTRY_KEY, &raw),
            Err(e) => tracing::warn!("Failed to serialize session registry: {}", e),
        }
    }

    /// All sessions sorted by `updated_at` descending
    ///
    /// The sort is stable, so equal timestamps keep insertion order.
    pub fn list_sessions(&self) -> Vec<SessionMeta> {
        let mut list = self.read_registry();
        list.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        list
    }

    /// Look up one session's metadata by id
    pub fn find_session(&self, id: &str) -> Option<SessionMeta> {
        self.read_registry().into_iter().find(|s| s.id == id)
    }

    /// Insert or replace a session record by id
    ///
    /// The caller supplies the whole record; no partial merge happens here.
    pub fn upsert_session(&self, meta: SessionMeta) {
        let mut list = self.read_registry();
        match list.iter_mut().find(|s| s.id == meta.id) {
            Some(slot) => *slot = meta,
            None => list.push(meta),
        }
        self.write_registry(&list);
    }

    /// The message ledger for a session; empty if none stored
    pub fn get_messages(&self, id: &str) -> Vec<StoredMessage> {
        let Some(raw) = self.kv.get(&Self::ledger_key(id)) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(messages) => messages,
            Err(e) => {
                tracing::warn!("Malformed ledger for session {}, starting empty: {}", id, e);
                Vec::new()
            }
        }
    }

    /// Overwrite the full ledger for a session, then touch its `updated_at`
    ///
    /// The touch is a no-op when the session is not in the registry. The new
    /// timestamp never moves backwards, keeping `updated_at` monotonic per
    /// id even under clock regression.
    pub fn save_messages(&self, id: &str, messages: &[StoredMessage]) {
        match serde_json::to_string(messages) {
            Ok(raw) => self.kv.put(&Self::ledger_key(id), &raw),
            Err(e) => {
                tracing::warn!("Failed to serialize ledger for session {}: {}", id, e);
                return;
            }
        }

        let mut list = self.read_registry();
        if let Some(meta) = list.iter_mut().find(|s| s.id == id) {
            meta.updated_at = Utc::now().max(meta.updated_at);
            self.write_registry(&list);
        }
    }

    /// Record a resolved title on a session
    ///
    /// Does not touch `updated_at`; a no-op for unknown ids. Repeated calls
    /// overwrite the field (last-write-wins).
    pub fn set_title(&self, id: &str, title: &str) {
        let mut list = self.read_registry();
        if let Some(meta) = list.iter_mut().find(|s| s.id == id) {
            meta.title = Some(title.to_string());
            self.write_registry(&list);
        }
    }

    /// Obtain a new session from the backend and register it locally
    ///
    /// Registers metadata (provided title or none, timestamp now) together
    /// with an empty ledger. Backend failures propagate to the caller.
    pub async fn create_session(&self, title: Option<&str>) -> Result<SessionMeta> {
        let id = self.backend.create_session().await?;
        let meta = SessionMeta::new(id, title.map(|t| t.to_string()));

        let mut list = self.read_registry();
        list.push(meta.clone());
        self.write_registry(&list);
        self.save_ledger_empty(&meta.id);

        Ok(meta)
    }

    fn save_ledger_empty(&self, id: &str) {
        self.kv.put(&Self::ledger_key(id), "[]");
    }

    /// Remove a session's registry entry and ledger locally
    ///
    /// Local-only; callers are expected to have already deleted the session
    /// on the backend.
    pub fn remove_session(&self, id: &str) {
        let mut list = self.read_registry();
        list.retain(|s| s.id != id);
        self.write_registry(&list);
        self.kv.remove(&Self::ledger_key(id));
    }
}
