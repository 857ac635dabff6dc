//! Error types for the BuzzBot client
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

#![allow(dead_code)]

use thiserror::Error;

/// Main error type for BuzzBot client operations
///
/// Covers configuration loading, backend HTTP calls, local persistence,
/// and the serialization boundaries between them.
#[derive(Error, Debug)]
pub enum BuzzBotError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Backend API errors (session creation, chat, title, delete)
    #[error("Backend error: {0}")]
    Backend(String),

    /// Local session store errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for BuzzBot client operations
///
/// Uses `anyhow::Error` as the error type, allowing for rich error
/// context and easy propagation with `?`.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = BuzzBotError::Config("invalid base_url".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid base_url");
    }

    #[test]
    fn test_backend_error_display() {
        let error = BuzzBotError::Backend("chat request failed: HTTP 502".to_string());
        assert_eq!(
            error.to_string(),
            "Backend error: chat request failed: HTTP 502"
        );
    }

    #[test]
    fn test_storage_error_display() {
        let error = BuzzBotError::Storage("could not determine data directory".to_string());
        assert_eq!(
            error.to_string(),
            "Storage error: could not determine data directory"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: BuzzBotError = io_error.into();
        assert!(matches!(error, BuzzBotError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{broken").unwrap_err();
        let error: BuzzBotError = json_error.into();
        assert!(matches!(error, BuzzBotError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("invalid: : yaml").unwrap_err();
        let error: BuzzBotError = yaml_error.into();
        assert!(matches!(error, BuzzBotError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BuzzBotError>();
    }
}
