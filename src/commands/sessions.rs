//! Session management command handlers

use crate::commands::build_components;
use crate::config::Config;
use crate::error::Result;
use crate::session::SessionList;
use crate::store::{SessionMeta, SessionStore};
use anyhow::Context;
use colored::Colorize;
use prettytable::{format, Table};

/// Print the stored session list
pub fn list_sessions(config: &Config) -> Result<()> {
    let (store, _backend) = build_components(config)?;
    let sessions = store.list_sessions();

    if sessions.is_empty() {
        println!("{}", "No sessions yet. Create one to get started.".yellow());
        return Ok(());
    }

    print_session_table(&store, &sessions);
    println!(
        "Use {} to continue a session.",
        "buzzbot chat --session <ID>".cyan()
    );
    println!();
    Ok(())
}

/// Create a new backend session and register it locally
pub async fn new_session(config: &Config, title: Option<String>) -> Result<()> {
    let (store, backend) = build_components(config)?;
    let mut list = SessionList::new(store, backend);

    let meta = list
        .create(title.as_deref())
        .await
        .context("failed to create session")?;

    println!(
        "{}",
        format!("Created session {} ({})", meta.id, meta.display_title()).green()
    );
    Ok(())
}

/// Delete a session on the backend, then locally
///
/// Accepts a full id or a unique id prefix.
pub async fn delete_session(config: &Config, id: String) -> Result<()> {
    let (store, backend) = build_components(config)?;
    let mut list = SessionList::new(store, backend);

    let full_id = list
        .resolve(&id)
        .ok_or_else(|| anyhow::anyhow!("unknown session id: {}", id))?;

    list.delete(&full_id)
        .await
        .context("backend delete failed; local session left untouched")?;

    println!("{}", format!("Deleted session {}", full_id).green());
    Ok(())
}

/// Pull the backend session listing into the local store
pub async fn sync_sessions(config: &Config) -> Result<()> {
    let (store, backend) = build_components(config)?;
    let mut list = SessionList::new(store.clone(), backend);

    list.sync_remote()
        .await
        .context("failed to fetch backend session listing")?;

    println!("{}", "Synchronized with backend.".green());
    print_session_table(&store, list.sessions());
    Ok(())
}

fn print_session_table(store: &SessionStore, sessions: &[SessionMeta]) {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    table.add_row(prettytable::row![
        "ID".bold(),
        "Title".bold(),
        "Messages".bold(),
        "Last Updated".bold()
    ]);

    for session in sessions {
        let id_short: String = session.id.chars().take(8).collect();
        let mut title = session.display_title();
        if title.len() > 40 {
            title.truncate(37);
            title.push_str("...");
        }
        let message_count = store.get_messages(&session.id).len();
        let updated = session.updated_at.format("%Y-%m-%d %H:%M").to_string();

        table.add_row(prettytable::row![
            id_short.cyan(),
            title,
            message_count,
            updated
        ]);
    }

    println!("\nSessions:");
    table.printstd();
    println!();
}
