/*!
Command handlers for the CLI

This module provides the handlers invoked by the CLI entrypoint:

- `chat`     — Interactive chat mode
- `sessions` — Session listing, creation, deletion, and backend sync
- `special`  — Slash-command parsing for the chat loop

Handlers are intentionally small and wire together the library components:
the key-value store, the session store, the backend client, and the
controllers.
*/

use crate::api::{BackendClient, HttpBackend};
use crate::config::Config;
use crate::error::Result;
use crate::store::{KeyValueStore, SessionStore, SledStore};
use std::sync::Arc;

pub mod chat;
pub mod sessions;
pub mod special;

/// Build the shared store and backend from configuration
pub(crate) fn build_components(
    config: &Config,
) -> Result<(Arc<SessionStore>, Arc<dyn BackendClient>)> {
    let backend: Arc<dyn BackendClient> = Arc::new(HttpBackend::new(&config.backend)?);
    let kv: Arc<dyn KeyValueStore> = match &config.storage.path {
        Some(path) => Arc::new(SledStore::open(path.clone())?),
        None => Arc::new(SledStore::open_default()?),
    };
    let store = Arc::new(SessionStore::new(kv, backend.clone()));
    Ok((store, backend))
}
