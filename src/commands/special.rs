//! Slash commands available inside the interactive chat loop

use colored::Colorize;

/// Parsed slash command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// `/new` - create and switch to a fresh session
    NewSession,
    /// `/sessions` - list stored sessions
    ListSessions,
    /// `/switch <id>` - switch to another session
    Switch(String),
    /// `/delete <id>` - delete a session
    Delete(String),
    /// `/help`
    Help,
    /// `/exit` or `/quit`
    Exit,
    /// Input starting with `/` that matched nothing
    Unknown(String),
    /// Regular chat input
    None,
}

/// Parse user input into a slash command
///
/// Anything not starting with `/` is regular chat input.
pub fn parse_special_command(input: &str) -> SpecialCommand {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return SpecialCommand::None;
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let head = parts.next().unwrap_or("");
    let rest = parts.next().map(str::trim).unwrap_or("");

    match head {
        "/new" => SpecialCommand::NewSession,
        "/sessions" => SpecialCommand::ListSessions,
        "/switch" if !rest.is_empty() => SpecialCommand::Switch(rest.to_string()),
        "/delete" if !rest.is_empty() => SpecialCommand::Delete(rest.to_string()),
        "/help" => SpecialCommand::Help,
        "/exit" | "/quit" => SpecialCommand::Exit,
        other => SpecialCommand::Unknown(other.to_string()),
    }
}

/// Print the slash-command help text
pub fn print_help() {
    println!();
    println!("{}", "Commands:".bold());
    println!("  {}       Create and switch to a new session", "/new".cyan());
    println!("  {}  List stored sessions", "/sessions".cyan());
    println!("  {}  Switch to another session", "/switch <id>".cyan());
    println!("  {}  Delete a session", "/delete <id>".cyan());
    println!("  {}      Show this help", "/help".cyan());
    println!("  {}      Leave the chat", "/exit".cyan());
    println!();
}
