//! Shared helpers for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use buzzbot::api::{BackendClient, ChatOutcome, RemoteSession};
use buzzbot::error::Result;
use buzzbot::store::{SessionStore, SledStore};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Backend stub with scriptable responses and call recording
pub struct RecordingBackend {
    pub next_id: Mutex<String>,
    pub chat_reply: Mutex<Result<ChatOutcome>>,
    pub title: Mutex<Option<String>>,
    pub remote: Mutex<Vec<RemoteSession>>,
    pub fail_delete: bool,
    pub chat_calls: AtomicUsize,
    pub title_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            next_id: Mutex::new("test-session".to_string()),
            chat_reply: Mutex::new(Ok(ChatOutcome::Reply("ack".to_string()))),
            title: Mutex::new(None),
            remote: Mutex::new(Vec::new()),
            fail_delete: false,
            chat_calls: AtomicUsize::new(0),
            title_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
        }
    }
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BackendClient for RecordingBackend {
    async fn create_session(&self) -> Result<String> {
        Ok(self.next_id.lock().unwrap().clone())
    }

    async fn send_chat(&self, _prompt: &str, _session_id: &str) -> Result<ChatOutcome> {
        self.chat_calls.fetch_add(1, Ordering::SeqCst);
        match &*self.chat_reply.lock().unwrap() {
            Ok(outcome) => Ok(outcome.clone()),
            Err(e) => anyhow::bail!("{}", e),
        }
    }

    async fn fetch_title(&self, _session_id: &str) -> Result<Option<String>> {
        self.title_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.title.lock().unwrap().clone())
    }

    async fn list_sessions(&self) -> Result<Vec<RemoteSession>> {
        Ok(self.remote.lock().unwrap().clone())
    }

    async fn delete_session(&self, _session_id: &str) -> Result<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete {
            anyhow::bail!("delete refused");
        }
        Ok(())
    }
}

/// Create a sled-backed session store in a temp directory
///
/// Returns the store, the backend handle, and the `TempDir` so the caller
/// keeps ownership of the directory (preventing early cleanup).
pub fn create_temp_store() -> (Arc<SessionStore>, Arc<RecordingBackend>, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("failed to create tempdir");
    let kv = SledStore::open(dir.path().join("store")).expect("failed to open store");
    let backend = Arc::new(RecordingBackend::new());
    let store = Arc::new(SessionStore::new(Arc::new(kv), backend.clone()));
    (store, backend, dir)
}
