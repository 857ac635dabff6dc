//! Session list controller
//!
//! Bridges UI session actions (create, select, delete, sync) to the local
//! store and the backend session API. Holds the sorted session list and the
//! current selection; selection itself is pure UI state with no store side
//! effects.

use crate::api::BackendClient;
use crate::error::Result;
use crate::store::{SessionMeta, SessionStore};
use std::sync::Arc;

/// Sorted session list with a current selection
pub struct SessionList {
    store: Arc<SessionStore>,
    backend: Arc<dyn BackendClient>,
    sessions: Vec<SessionMeta>,
    selected: Option<String>,
}

impl SessionList {
    /// Create a controller and load the current sorted list
    pub fn new(store: Arc<SessionStore>, backend: Arc<dyn BackendClient>) -> Self {
        let mut list = Self {
            store,
            backend,
            sessions: Vec::new(),
            selected: None,
        };
        list.refresh();
        list
    }

    /// Re-read the sorted list from the store
    pub fn refresh(&mut self) {
        self.sessions = self.store.list_sessions();
    }

    /// Sessions sorted by recency
    pub fn sessions(&self) -> &[SessionMeta] {
        &self.sessions
    }

    /// Id of the selected session, if any
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Metadata of the selected session, if any
    pub fn selected_meta(&self) -> Option<&SessionMeta> {
        let id = self.selected.as_deref()?;
        self.sessions.iter().find(|s| s.id == id)
    }

    /// Create a backend session, refresh the list, and select it
    ///
    /// Backend failure propagates to the caller; no retry is attempted.
    pub async fn create(&mut self, title: Option<&str>) -> Result<SessionMeta> {
        let meta = self.store.create_session(title).await?;
        self.refresh();
        self.selected = Some(meta.id.clone());
        Ok(meta)
    }

    /// Resolve a full id or unique id prefix to a known session id
    ///
    /// Exact matches win; otherwise a prefix must match exactly one session.
    pub fn resolve(&self, needle: &str) -> Option<String> {
        if needle.is_empty() {
            return None;
        }
        if let Some(exact) = self.sessions.iter().find(|s| s.id == needle) {
            return Some(exact.id.clone());
        }
        let mut matches = self.sessions.iter().filter(|s| s.id.starts_with(needle));
        match (matches.next(), matches.next()) {
            (Some(only), None) => Some(only.id.clone()),
            _ => None,
        }
    }

    /// Select a session by id; pure UI state change
    ///
    /// Returns false (and leaves the selection unchanged) for unknown ids.
    pub fn select(&mut self, id: &str) -> bool {
        if self.sessions.iter().any(|s| s.id == id) {
            self.selected = Some(id.to_string());
            true
        } else {
            false
        }
    }

    /// Delete a session on the backend, then locally
    ///
    /// If the backend call fails the local registry and ledger are left
    /// untouched, avoiding local/remote divergence. On success the selection
    /// falls back to the most recent remaining session.
    pub async fn delete(&mut self, id: &str) -> Result<()> {
        self.backend.delete_session(id).await?;

        self.store.remove_session(id);
        self.refresh();
        if self.selected.as_deref() == Some(id) {
            self.selected = self.sessions.first().map(|s| s.id.clone());
        }
        Ok(())
    }

    /// Pull the backend-driven session listing into the local registry
    ///
    /// Backend records win for title and timestamp; a remote title only
    /// overwrites when present. Locally-known sessions absent from the
    /// backend are kept, since the local store is the only ledger holder.
    pub async fn sync_remote(&mut self) -> Result<()> {
        let remote = self.backend.list_sessions().await?;
        for entry in remote {
            let title = match (entry.title.clone(), self.store.find_session(&entry.id)) {
                (Some(remote_title), _) => Some(remote_title),
                (None, Some(local)) => local.title,
                (None, None) => None,
            };
            self.store.upsert_session(SessionMeta {
                id: entry.id.clone(),
                title,
                updated_at: entry.updated_at(),
            });
        }
        self.refresh();
        Ok(())
    }
}
