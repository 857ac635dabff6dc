//! Wire types for the BuzzBot backend API
//!
//! Raw response shapes stay private to the API layer; the rest of the crate
//! works with the decoded [`ChatOutcome`] variants.

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

/// Literal substituted when the backend returns no usable reply text
pub const FALLBACK_REPLY: &str = "(No reply)";

/// Response from `POST /session/new`
#[derive(Debug, Deserialize)]
pub(crate) struct SessionCreatedResponse {
    pub session_id: String,
}

/// Response from `POST /chat`
///
/// The three optional fields encode three mutually exclusive outcomes; the
/// decode into [`ChatOutcome`] makes the variant explicit.
#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub video_status: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
}

/// Response from `POST /session/{id}/title`
#[derive(Debug, Deserialize)]
pub(crate) struct TitleResponse {
    #[serde(default)]
    pub title: Option<String>,
}

/// One entry of the backend-driven session listing (`GET /sessions`)
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteSession {
    /// Server-issued session id
    pub id: String,
    /// Title known to the backend, if any
    #[serde(default)]
    pub title: Option<String>,
    /// Last-updated time in epoch milliseconds
    #[serde(rename = "updatedAt")]
    pub updated_at_millis: i64,
}

impl RemoteSession {
    /// Last-updated time as a UTC timestamp
    ///
    /// Out-of-range values fall back to the epoch rather than failing.
    pub fn updated_at(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.updated_at_millis)
            .single()
            .unwrap_or_else(|| Utc.timestamp_millis_opt(0).unwrap())
    }
}

/// Decoded outcome of one chat exchange
#[derive(Debug, Clone, PartialEq)]
pub enum ChatOutcome {
    /// Plain assistant reply text
    Reply(String),
    /// The backend started generating a video for this turn
    VideoGenerating,
    /// The backend finished a video and returned its reference
    VideoReady(String),
}

impl From<ChatResponse> for ChatOutcome {
    fn from(raw: ChatResponse) -> Self {
        if raw.video_status.as_deref() == Some("generating") {
            return ChatOutcome::VideoGenerating;
        }
        if let Some(url) = raw.video_url.filter(|u| !u.is_empty()) {
            return ChatOutcome::VideoReady(url);
        }
        let reply = raw
            .reply
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| FALLBACK_REPLY.to_string());
        ChatOutcome::Reply(reply)
    }
}
