//! BuzzBot - short-video content assistant client library
//!
//! Core functionality for the BuzzBot CLI: local session persistence,
//! session and transcript controllers, and the backend API client.
//!
//! # Architecture
//!
//! - `store`: key-value capability, session registry, and message ledgers
//! - `session`: session list controller (create/select/delete/sync)
//! - `chat`: transcript controller, send state machine, observer events
//! - `api`: backend client trait and HTTP implementation
//! - `config`: configuration management and validation
//! - `error`: error types and result alias
//! - `cli`: command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use buzzbot::api::HttpBackend;
//! use buzzbot::chat::Transcript;
//! use buzzbot::store::{MemoryStore, SessionStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = Arc::new(HttpBackend::new(&Default::default())?);
//!     let store = Arc::new(SessionStore::new(
//!         Arc::new(MemoryStore::new()),
//!         backend.clone(),
//!     ));
//!
//!     let meta = store.create_session(None).await?;
//!     let (mut transcript, _events) = Transcript::new(store, backend);
//!     transcript.activate(&meta.id);
//!     transcript.send("Give me a hook for a cooking niche").await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod chat;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use api::{BackendClient, ChatOutcome, HttpBackend};
pub use chat::{ChatEvent, ChatStatus, Transcript};
pub use config::Config;
pub use error::{BuzzBotError, Result};
pub use session::SessionList;
pub use store::{SessionMeta, SessionStore, StoredMessage};
