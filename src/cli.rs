//! Command-line interface definition for the BuzzBot client
//!
//! Defines the CLI structure using clap's derive API: an interactive chat
//! command and session management subcommands.

use clap::{Parser, Subcommand};

/// BuzzBot - short-video content assistant client
///
/// Converse with the BuzzBot backend to craft hooks, scripts, and captions;
/// sessions and transcripts are kept in a local store.
#[derive(Parser, Debug, Clone)]
#[command(name = "buzzbot")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the backend base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Override the local store path
    #[arg(long)]
    pub store_path: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat session
    Chat {
        /// Resume a specific session by id (defaults to the most recent)
        #[arg(short, long)]
        session: Option<String>,
    },

    /// Manage stored sessions
    Sessions {
        /// Session management subcommand
        #[command(subcommand)]
        command: SessionCommand,
    },
}

/// Session management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum SessionCommand {
    /// List stored sessions
    List,

    /// Create a new session
    New {
        /// Title for the new session
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Delete a session (backend first, then locally)
    Delete {
        /// Session id to delete
        id: String,
    },

    /// Pull the backend session listing into the local store
    Sync,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
