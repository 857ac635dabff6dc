//! Chat transcript controller
//!
//! Holds the in-memory message list for the active session and drives the
//! send state machine: optimistic user append, one outstanding request at a
//! time, outcome-variant matching, fixed apology on failure, and the
//! opportunistic title-derivation side effect.
//!
//! All mutation happens on the caller's task. The only spawned work is the
//! title fetch; its resolution is applied to the store keyed by session id
//! (safe regardless of what is active) while observer notification is gated
//! on an activation epoch so a stale session never surfaces events.

use crate::api::{BackendClient, ChatOutcome};
use crate::chat::events::{ChatEvent, ChatStatus};
use crate::store::{SessionStore, StoredMessage};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Fixed message substituted into the transcript when a chat request fails
pub const CHAT_ERROR_REPLY: &str = "Sorry, there was an error contacting the AI webserver.";

/// Placeholder content for the assistant message while a video renders
pub const VIDEO_GENERATING_REPLY: &str = "Generating your video...";

/// Content of the assistant message that carries a finished video reference
pub const VIDEO_READY_REPLY: &str = "Your video is ready.";

/// Request state for the active session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SendState {
    /// No request outstanding
    Idle,
    /// One chat request in flight; further sends are no-ops
    AwaitingReply,
}

/// In-memory transcript for the active session
pub struct Transcript {
    store: Arc<SessionStore>,
    backend: Arc<dyn BackendClient>,
    events: UnboundedSender<ChatEvent>,
    session_id: Option<String>,
    messages: Vec<StoredMessage>,
    state: SendState,
    epoch: Arc<AtomicU64>,
}

impl Transcript {
    /// Create a transcript controller and its event receiver
    pub fn new(
        store: Arc<SessionStore>,
        backend: Arc<dyn BackendClient>,
    ) -> (Self, UnboundedReceiver<ChatEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let transcript = Self {
            store,
            backend,
            events: tx,
            session_id: None,
            messages: Vec::new(),
            state: SendState::Idle,
            epoch: Arc::new(AtomicU64::new(0)),
        };
        (transcript, rx)
    }

    /// Switch the controller to a session, loading its stored ledger
    ///
    /// Bumps the activation epoch so resolutions belonging to the previous
    /// session are discarded instead of surfaced.
    pub fn activate(&mut self, session_id: &str) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.session_id = Some(session_id.to_string());
        self.messages = self.store.get_messages(session_id);
        self.state = SendState::Idle;
        tracing::debug!("Activated session {}", session_id);
    }

    /// Id of the active session, if any
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Messages of the active session, in append order
    pub fn messages(&self) -> &[StoredMessage] {
        &self.messages
    }

    /// True while a chat request is outstanding
    pub fn is_awaiting_reply(&self) -> bool {
        self.state == SendState::AwaitingReply
    }

    /// Send one user prompt through the chat state machine
    ///
    /// A no-op when the input is empty/whitespace, a request is already in
    /// flight, or no session is active. Chat failures are recovered locally
    /// by appending [`CHAT_ERROR_REPLY`]; the conversation continues either
    /// way and the state always returns to idle.
    pub async fn send(&mut self, input: &str) {
        let prompt = input.trim();
        if prompt.is_empty() || self.state == SendState::AwaitingReply {
            return;
        }
        let Some(session_id) = self.session_id.clone() else {
            return;
        };

        self.messages.push(StoredMessage::user(prompt));
        self.persist(&session_id);
        self.state = SendState::AwaitingReply;

        match self.backend.send_chat(prompt, &session_id).await {
            Ok(ChatOutcome::VideoGenerating) => {
                self.messages
                    .push(StoredMessage::assistant_generating(VIDEO_GENERATING_REPLY));
                self.notify(ChatEvent::Status {
                    session_id: session_id.clone(),
                    status: ChatStatus::Generating,
                });
            }
            Ok(ChatOutcome::VideoReady(url)) => {
                self.messages
                    .push(StoredMessage::assistant_video(VIDEO_READY_REPLY, &url));
                self.notify(ChatEvent::VideoReady {
                    session_id: session_id.clone(),
                    url,
                });
                self.notify(ChatEvent::Status {
                    session_id: session_id.clone(),
                    status: ChatStatus::Idle,
                });
            }
            Ok(ChatOutcome::Reply(text)) => {
                self.messages.push(StoredMessage::assistant(text));
            }
            Err(e) => {
                tracing::warn!("Chat request failed for session {}: {}", session_id, e);
                self.messages.push(StoredMessage::assistant(CHAT_ERROR_REPLY));
            }
        }

        self.persist(&session_id);
        self.state = SendState::Idle;
        self.maybe_fetch_title(&session_id);
    }

    fn persist(&self, session_id: &str) {
        self.store.save_messages(session_id, &self.messages);
    }

    fn notify(&self, event: ChatEvent) {
        // Receiver may be gone (e.g. headless use); that's fine.
        let _ = self.events.send(event);
    }

    /// Kick off a title fetch when the transcript qualifies
    ///
    /// Fires once at least two user-authored messages exist and the session
    /// has no resolved title. Overlapping fetches are possible under rapid
    /// mutation and race benignly: the store write is last-write-wins.
    fn maybe_fetch_title(&self, session_id: &str) {
        let user_messages = self
            .messages
            .iter()
            .filter(|m| m.role == crate::store::Role::User)
            .count();
        if user_messages < 2 {
            return;
        }
        let Some(meta) = self.store.find_session(session_id) else {
            return;
        };
        if meta.title.is_some() {
            return;
        }

        let backend = self.backend.clone();
        let store = self.store.clone();
        let events = self.events.clone();
        let epoch = self.epoch.clone();
        let snapshot = epoch.load(Ordering::SeqCst);
        let id = session_id.to_string();

        tokio::spawn(async move {
            match backend.fetch_title(&id).await {
                Ok(Some(title)) => {
                    store.set_title(&id, &title);
                    if epoch.load(Ordering::SeqCst) == snapshot {
                        let _ = events.send(ChatEvent::TitleUpdated {
                            session_id: id,
                            title,
                        });
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    // The next qualifying mutation retries.
                    tracing::debug!("Title fetch failed for session {}: {}", id, e);
                }
            }
        });
    }
}
