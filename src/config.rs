//! Configuration management for the BuzzBot client
//!
//! Handles loading, parsing, validating, and overriding configuration from
//! the config file, environment variables, and CLI flags.

use crate::cli::Cli;
use crate::error::{BuzzBotError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Backend API settings
    #[serde(default)]
    pub backend: BackendConfig,

    /// Local store settings
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the BuzzBot backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    120
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

/// Local store configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Store path override; platform data directory when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration, falling back to defaults when the file is absent
    ///
    /// Precedence, lowest to highest: built-in defaults, config file,
    /// environment variables (`BUZZBOT_BASE_URL`, `BUZZBOT_STORE_PATH`),
    /// CLI flags.
    pub fn load(path: &str, cli: &Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::debug!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| BuzzBotError::Config(format!("failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| BuzzBotError::Config(format!("failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("BUZZBOT_BASE_URL") {
            self.backend.base_url = base_url;
        }
        if let Ok(store_path) = std::env::var("BUZZBOT_STORE_PATH") {
            self.storage.path = Some(PathBuf::from(store_path));
        }
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(base_url) = &cli.base_url {
            self.backend.base_url = base_url.clone();
        }
        if let Some(store_path) = &cli.store_path {
            self.storage.path = Some(PathBuf::from(store_path));
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error when the base URL does not parse or the timeout is zero
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.backend.base_url).map_err(|e| {
            BuzzBotError::Config(format!(
                "invalid backend base_url '{}': {}",
                self.backend.base_url, e
            ))
        })?;

        if self.backend.timeout_seconds == 0 {
            return Err(BuzzBotError::Config("timeout_seconds must be non-zero".into()).into());
        }

        Ok(())
    }
}
