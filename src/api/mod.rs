//! BuzzBot backend API client
//!
//! This module defines the [`BackendClient`] trait the controllers talk to,
//! along with the reqwest-based [`HttpBackend`] implementation. The trait
//! boundary exists so tests can substitute a mock backend without a server.

use crate::config::BackendConfig;
use crate::error::{BuzzBotError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;

pub mod types;

pub use types::{ChatOutcome, RemoteSession, FALLBACK_REPLY};

use types::{ChatResponse, SessionCreatedResponse, TitleResponse};

/// Remote collaborator for session lifecycle and chat exchange
///
/// All methods perform a single attempt; nothing here retries.
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// Request a new backend session and return its id
    async fn create_session(&self) -> Result<String>;

    /// Send one chat prompt for a session and decode the outcome
    async fn send_chat(&self, prompt: &str, session_id: &str) -> Result<ChatOutcome>;

    /// Ask the backend for a derived title; `None` when it has none yet
    async fn fetch_title(&self, session_id: &str) -> Result<Option<String>>;

    /// Fetch the backend-driven session listing
    async fn list_sessions(&self) -> Result<Vec<RemoteSession>>;

    /// Delete a session on the backend
    async fn delete_session(&self, session_id: &str) -> Result<()>;
}

/// HTTP implementation of [`BackendClient`]
///
/// # Examples
///
/// ```no_run
/// use buzzbot::api::{BackendClient, HttpBackend};
/// use buzzbot::config::BackendConfig;
///
/// # async fn example() -> buzzbot::error::Result<()> {
/// let backend = HttpBackend::new(&BackendConfig::default())?;
/// let session_id = backend.create_session().await?;
/// # Ok(())
/// # }
/// ```
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a backend client from configuration
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("buzzbot/0.1.0")
            .build()
            .map_err(|e| BuzzBotError::Backend(format!("failed to create HTTP client: {}", e)))?;

        tracing::info!("Initialized backend client: base_url={}", config.base_url);

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl BackendClient for HttpBackend {
    async fn create_session(&self) -> Result<String> {
        let response = self
            .client
            .post(self.url("/session/new"))
            .json(&json!({}))
            .send()
            .await
            .map_err(|e| BuzzBotError::Backend(format!("session creation failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(BuzzBotError::Backend(format!(
                "session creation failed: HTTP {}",
                response.status()
            ))
            .into());
        }

        let created: SessionCreatedResponse = response
            .json()
            .await
            .map_err(|e| BuzzBotError::Backend(format!("invalid session response: {}", e)))?;

        tracing::debug!("Created backend session {}", created.session_id);
        Ok(created.session_id)
    }

    async fn send_chat(&self, prompt: &str, session_id: &str) -> Result<ChatOutcome> {
        let body = json!({ "prompt": prompt, "session_id": session_id });
        let response = self
            .client
            .post(self.url("/chat"))
            .json(&body)
            .send()
            .await
            .map_err(|e| BuzzBotError::Backend(format!("chat request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(BuzzBotError::Backend(format!(
                "chat request failed: HTTP {}",
                response.status()
            ))
            .into());
        }

        let raw: ChatResponse = response
            .json()
            .await
            .map_err(|e| BuzzBotError::Backend(format!("invalid chat response: {}", e)))?;

        Ok(raw.into())
    }

    async fn fetch_title(&self, session_id: &str) -> Result<Option<String>> {
        let response = self
            .client
            .post(self.url(&format!("/session/{}/title", session_id)))
            .send()
            .await
            .map_err(|e| BuzzBotError::Backend(format!("title request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(BuzzBotError::Backend(format!(
                "title request failed: HTTP {}",
                response.status()
            ))
            .into());
        }

        let raw: TitleResponse = response
            .json()
            .await
            .map_err(|e| BuzzBotError::Backend(format!("invalid title response: {}", e)))?;

        Ok(raw.title.filter(|t| !t.is_empty()))
    }

    async fn list_sessions(&self) -> Result<Vec<RemoteSession>> {
        let response = self
            .client
            .get(self.url("/sessions"))
            .send()
            .await
            .map_err(|e| BuzzBotError::Backend(format!("session listing failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(BuzzBotError::Backend(format!(
                "session listing failed: HTTP {}",
                response.status()
            ))
            .into());
        }

        let sessions: Vec<RemoteSession> = response
            .json()
            .await
            .map_err(|e| BuzzBotError::Backend(format!("invalid session listing: {}", e)))?;

        Ok(sessions)
    }

    async fn delete_session(&self, session_id: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/session/{}", session_id)))
            .send()
            .await
            .map_err(|e| BuzzBotError::Backend(format!("session delete failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(BuzzBotError::Backend(format!(
                "session delete failed: HTTP {}",
                response.status()
            ))
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(base_url: &str) -> HttpBackend {
        HttpBackend::new(&BackendConfig {
            base_url: base_url.to_string(),
            timeout_seconds: 5,
        })
        .expect("failed to build backend")
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let b = backend("http://localhost:8000/");
        assert_eq!(b.base_url(), "http://localhost:8000");
        assert_eq!(b.url("/chat"), "http://localhost:8000/chat");
    }

    #[test]
    fn test_url_building_with_session_path() {
        let b = backend("http://localhost:8000");
        assert_eq!(
            b.url(&format!("/session/{}/title", "abc123")),
            "http://localhost:8000/session/abc123/title"
        );
    }
}
