//! Observer events emitted by the transcript controller
//!
//! Consumers subscribe through the receiver handed out by
//! [`Transcript::new`](crate::chat::Transcript::new) and react to video
//! status changes and derived titles. Every event is tagged with the session
//! it belongs to.

/// Video workflow status for the active session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatStatus {
    /// The backend is generating a video
    Generating,
    /// No video work outstanding
    Idle,
}

/// Notification emitted on transcript side effects
#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    /// Video workflow status changed
    Status {
        /// Session the status belongs to
        session_id: String,
        /// New status
        status: ChatStatus,
    },
    /// A completed video reference arrived
    VideoReady {
        /// Session the video belongs to
        session_id: String,
        /// Video reference returned by the backend
        url: String,
    },
    /// The backend derived a title for a session
    TitleUpdated {
        /// Session the title belongs to
        session_id: String,
        /// Derived title
        title: String,
    },
}
