//! BuzzBot - short-video content assistant client
//!
//! Main entry point for the BuzzBot CLI.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use buzzbot::cli::{Cli, Commands, SessionCommand};
use buzzbot::commands;
use buzzbot::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;
    config.validate()?;

    match cli.command {
        Commands::Chat { session } => {
            tracing::info!("Starting interactive chat mode");
            if let Some(id) = &session {
                tracing::debug!("Resuming session: {}", id);
            }
            commands::chat::run_chat(config, session).await?;
            Ok(())
        }
        Commands::Sessions { command } => match command {
            SessionCommand::List => {
                commands::sessions::list_sessions(&config)?;
                Ok(())
            }
            SessionCommand::New { title } => {
                commands::sessions::new_session(&config, title).await?;
                Ok(())
            }
            SessionCommand::Delete { id } => {
                commands::sessions::delete_session(&config, id).await?;
                Ok(())
            }
            SessionCommand::Sync => {
                commands::sessions::sync_sessions(&config).await?;
                Ok(())
            }
        },
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "buzzbot=debug"
    } else {
        "buzzbot=info"
    };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
