//! Interactive chat mode handler
//!
//! Builds the store and backend, ensures a session is selected, and runs a
//! readline loop that submits input to the transcript controller. Slash
//! commands manage sessions without leaving the loop.

use crate::chat::{ChatEvent, ChatStatus, Transcript};
use crate::commands::build_components;
use crate::commands::special::{parse_special_command, print_help, SpecialCommand};
use crate::config::Config;
use crate::error::Result;
use crate::session::SessionList;
use crate::store::{Role, StoredMessage, VideoStatus};
use anyhow::Context;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tokio::sync::mpsc::UnboundedReceiver;

/// Greeting shown when the chat loop starts
const GREETING: &str = "Hey! I'm your TikTok Igniter AI. Tell me your niche and vibe (funny, \
educational, edgy) and I'll craft a scroll-stopping hook, 15-30s script, B-roll ideas, and \
caption/hashtags.";

/// Start interactive chat mode
///
/// # Arguments
///
/// * `config` - Global configuration (consumed)
/// * `resume` - Optional session id to resume; defaults to the most recent
///   session, creating one when the store is empty
pub async fn run_chat(config: Config, resume: Option<String>) -> Result<()> {
    let (store, backend) = build_components(&config)?;
    let mut sessions = SessionList::new(store.clone(), backend.clone());

    // Pick the active session: explicit resume id, else most recent, else a
    // fresh one from the backend.
    match resume {
        Some(id) => match sessions.resolve(&id) {
            Some(full_id) => {
                sessions.select(&full_id);
            }
            None => anyhow::bail!("unknown session id: {}", id),
        },
        None => match sessions.sessions().first().map(|s| s.id.clone()) {
            Some(most_recent) => {
                sessions.select(&most_recent);
            }
            None => {
                sessions
                    .create(None)
                    .await
                    .context("failed to create initial session")?;
            }
        },
    }

    let (mut transcript, mut events) = Transcript::new(store, backend);
    let active = sessions
        .selected()
        .expect("a session is always selected here")
        .to_string();
    transcript.activate(&active);

    print_banner();
    replay_ledger(transcript.messages());

    let mut rl = DefaultEditor::new()?;

    loop {
        drain_events(&mut events);
        // Re-read so asynchronously derived titles show up in the prompt.
        sessions.refresh();

        let prompt = format!(
            "[{}] >> ",
            sessions
                .selected_meta()
                .map(|m| m.display_title())
                .unwrap_or_else(|| "no session".to_string())
        );

        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                rl.add_history_entry(trimmed)?;

                match parse_special_command(trimmed) {
                    SpecialCommand::NewSession => {
                        match sessions.create(None).await {
                            Ok(meta) => {
                                transcript.activate(&meta.id);
                                println!("{}", format!("Started session {}", meta.id).green());
                            }
                            Err(e) => {
                                eprintln!("{}", format!("Could not create session: {}", e).red())
                            }
                        }
                        continue;
                    }
                    SpecialCommand::ListSessions => {
                        print_session_lines(&sessions);
                        continue;
                    }
                    SpecialCommand::Switch(id) => {
                        match sessions.resolve(&id) {
                            Some(full_id) => {
                                sessions.select(&full_id);
                                transcript.activate(&full_id);
                                replay_ledger(transcript.messages());
                            }
                            None => {
                                eprintln!("{}", format!("Unknown session id: {}", id).red())
                            }
                        }
                        continue;
                    }
                    SpecialCommand::Delete(id) => {
                        let Some(id) = sessions.resolve(&id) else {
                            eprintln!("{}", format!("Unknown session id: {}", id).red());
                            continue;
                        };
                        match sessions.delete(&id).await {
                            Ok(()) => {
                                println!("{}", format!("Deleted session {}", id).green());
                                // Deleting the active session moves us to the
                                // most recent remaining one (or a fresh one).
                                if transcript.session_id() == Some(id.as_str()) {
                                    let next = match sessions.selected() {
                                        Some(next) => next.to_string(),
                                        None => sessions.create(None).await?.id,
                                    };
                                    transcript.activate(&next);
                                    replay_ledger(transcript.messages());
                                }
                            }
                            Err(e) => eprintln!(
                                "{}",
                                format!("Delete failed, session kept locally: {}", e).red()
                            ),
                        }
                        continue;
                    }
                    SpecialCommand::Help => {
                        print_help();
                        continue;
                    }
                    SpecialCommand::Exit => break,
                    SpecialCommand::Unknown(cmd) => {
                        eprintln!(
                            "{}",
                            format!("Unknown command {} (try /help)", cmd).yellow()
                        );
                        continue;
                    }
                    SpecialCommand::None => {}
                }

                let seen = transcript.messages().len();
                println!("{}", "Thinking...".dimmed());
                transcript.send(trimmed).await;

                // Print the assistant's side of this turn (user echo is the
                // line just typed).
                for message in transcript.messages().iter().skip(seen + 1) {
                    print_message(message);
                }
                drain_events(&mut events);
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}", format!("Input error: {}", e).red());
                break;
            }
        }
    }

    println!("Bye!");
    Ok(())
}

fn print_banner() {
    println!();
    println!("{}", "BuzzBot".bold());
    println!("{}", GREETING);
    println!("Type {} for commands.", "/help".cyan());
    println!();
}

fn replay_ledger(messages: &[StoredMessage]) {
    for message in messages {
        print_message(message);
    }
    if !messages.is_empty() {
        println!();
    }
}

fn print_message(message: &StoredMessage) {
    match message.role {
        Role::User => println!("{} {}", "you:".bold(), message.content),
        Role::Assistant => {
            println!("{} {}", "buzzbot:".green().bold(), message.content);
            if message.video_status == Some(VideoStatus::Generating) {
                println!("{}", "  [video generation in progress]".yellow());
            }
            if let Some(url) = &message.video_url {
                println!("{}", format!("  [video] {}", url).cyan());
            }
        }
    }
}

fn print_session_lines(sessions: &SessionList) {
    if sessions.sessions().is_empty() {
        println!("{}", "No sessions stored.".yellow());
        return;
    }
    println!();
    for session in sessions.sessions() {
        let marker = if Some(session.id.as_str()) == sessions.selected() {
            "*"
        } else {
            " "
        };
        println!(
            "{} {}  {}  {}",
            marker,
            session.id.as_str().cyan(),
            session.display_title(),
            session
                .updated_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .dimmed()
        );
    }
    println!();
}

fn drain_events(events: &mut UnboundedReceiver<ChatEvent>) {
    while let Ok(event) = events.try_recv() {
        match event {
            ChatEvent::Status {
                status: ChatStatus::Generating,
                ..
            } => println!("{}", "[video] generation started".yellow()),
            ChatEvent::Status {
                status: ChatStatus::Idle,
                ..
            } => {}
            ChatEvent::VideoReady { url, .. } => {
                println!("{}", format!("[video] ready: {}", url).cyan())
            }
            ChatEvent::TitleUpdated { title, .. } => {
                println!("{}", format!("Session titled: {}", title).dimmed())
            }
        }
    }
}
