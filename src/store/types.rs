//! Persisted record types for the local session store
//!
//! These are the structures serialized into the key-value store: session
//! metadata in the registry record, and per-session message ledgers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for a stored session
///
/// The id is opaque and issued by the backend. The title stays `None`
/// until the user names the session or the backend derives one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMeta {
    /// Unique identifier for the session (server-issued)
    pub id: String,
    /// Resolved title, if any
    #[serde(default)]
    pub title: Option<String>,
    /// When the session's message ledger was last written
    pub updated_at: DateTime<Utc>,
}

impl SessionMeta {
    /// Create metadata for a freshly issued session id
    pub fn new(id: impl Into<String>, title: Option<String>) -> Self {
        Self {
            id: id.into(),
            title,
            updated_at: Utc::now(),
        }
    }

    /// Title to display, falling back to a short id-derived label
    ///
    /// # Examples
    ///
    /// ```
    /// use buzzbot::store::SessionMeta;
    ///
    /// let meta = SessionMeta::new("21173421201f4e56", None);
    /// assert_eq!(meta.display_title(), "Session 1f4e56");
    /// ```
    pub fn display_title(&self) -> String {
        match &self.title {
            Some(title) => title.clone(),
            None => {
                let tail_start = self.id.len().saturating_sub(6);
                format!("Session {}", &self.id[tail_start..])
            }
        }
    }
}

/// Role of a transcript message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message typed by the user
    User,
    /// Message produced by the assistant (including placeholders)
    Assistant,
}

/// Video generation state carried on an assistant message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoStatus {
    /// The backend accepted the request and is rendering the video
    Generating,
}

/// One message in a session's ledger
///
/// Ledgers are strictly append-ordered; messages are never reordered or
/// removed individually.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMessage {
    /// Author of the message
    pub role: Role,
    /// Message text
    pub content: String,
    /// Present while the backend is generating a video for this turn
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_status: Option<VideoStatus>,
    /// Reference to a completed video
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl StoredMessage {
    /// Creates a new user message
    ///
    /// # Examples
    ///
    /// ```
    /// use buzzbot::store::{Role, StoredMessage};
    ///
    /// let msg = StoredMessage::user("Give me a hook for a cooking niche");
    /// assert_eq!(msg.role, Role::User);
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            video_status: None,
            video_url: None,
        }
    }

    /// Creates a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            video_status: None,
            video_url: None,
        }
    }

    /// Creates the assistant placeholder shown while a video renders
    pub fn assistant_generating(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            video_status: Some(VideoStatus::Generating),
            video_url: None,
        }
    }

    /// Creates an assistant message referencing a completed video
    pub fn assistant_video(content: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            video_status: None,
            video_url: Some(url.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_user() {
        let msg = StoredMessage::user("Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Hello");
        assert!(msg.video_status.is_none());
        assert!(msg.video_url.is_none());
    }

    #[test]
    fn test_message_assistant() {
        let msg = StoredMessage::assistant("Hi there");
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.content, "Hi there");
    }

    #[test]
    fn test_message_assistant_generating() {
        let msg = StoredMessage::assistant_generating("Working on it");
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.video_status, Some(VideoStatus::Generating));
        assert!(msg.video_url.is_none());
    }

    #[test]
    fn test_message_assistant_video() {
        let msg = StoredMessage::assistant_video("Done", "https://cdn.example/clip.mp4");
        assert_eq!(msg.video_url.as_deref(), Some("https://cdn.example/clip.mp4"));
        assert!(msg.video_status.is_none());
    }

    #[test]
    fn test_message_serialization_roles_lowercase() {
        let json = serde_json::to_string(&StoredMessage::user("x")).unwrap();
        assert!(json.contains("\"role\":\"user\""));
        let json = serde_json::to_string(&StoredMessage::assistant("y")).unwrap();
        assert!(json.contains("\"role\":\"assistant\""));
    }

    #[test]
    fn test_message_serialization_skips_absent_video_fields() {
        let json = serde_json::to_string(&StoredMessage::user("x")).unwrap();
        assert!(!json.contains("video_status"));
        assert!(!json.contains("video_url"));
    }

    #[test]
    fn test_message_serialization_video_status_tag() {
        let json = serde_json::to_string(&StoredMessage::assistant_generating("wait")).unwrap();
        assert!(json.contains("\"video_status\":\"generating\""));
    }

    #[test]
    fn test_message_roundtrip() {
        let messages = vec![
            StoredMessage::user("a"),
            StoredMessage::assistant("b"),
            StoredMessage::assistant_video("c", "https://cdn.example/v.mp4"),
        ];
        let json = serde_json::to_string(&messages).unwrap();
        let decoded: Vec<StoredMessage> = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, messages);
    }

    #[test]
    fn test_session_meta_display_title_resolved() {
        let mut meta = SessionMeta::new("abc123def456", None);
        meta.title = Some("Growth Hacks".to_string());
        assert_eq!(meta.display_title(), "Growth Hacks");
    }

    #[test]
    fn test_session_meta_display_title_fallback_short_id() {
        let meta = SessionMeta::new("ab", None);
        assert_eq!(meta.display_title(), "Session ab");
    }

    #[test]
    fn test_session_meta_deserializes_without_title_field() {
        let json = r#"{"id":"s1","updated_at":"2025-06-01T00:00:00Z"}"#;
        let meta: SessionMeta = serde_json::from_str(json).unwrap();
        assert_eq!(meta.id, "s1");
        assert!(meta.title.is_none());
    }
}
