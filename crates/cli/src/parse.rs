//! Turning input lines into actions.

use clap::ArgMatches;
use scribe_executor::Request;

use crate::commands::build_line_cmd;

/// What one input line asks for.
#[derive(Debug, PartialEq)]
pub enum LineAction {
    /// Dispatch a request
    Request(Request),
    /// Open a session
    Open { path: String },
    /// Close a session
    Close { id: String },
    /// Save a session
    Save { id: String, path: Option<String> },
    /// List sessions
    Sessions,
    /// List operations
    Ops,
}

/// Prompt-only commands handled before parsing.
#[derive(Debug, PartialEq)]
pub enum MetaCommand {
    Quit,
    Help,
}

/// Recognise `quit`/`exit`/`help`.
pub fn check_meta_command(line: &str) -> Option<MetaCommand> {
    match line.trim() {
        "quit" | "exit" => Some(MetaCommand::Quit),
        "help" => Some(MetaCommand::Help),
        _ => None,
    }
}

/// Parse a non-empty, trimmed line.
pub fn parse_line(line: &str) -> Result<LineAction, String> {
    if line.starts_with('{') {
        return Request::from_json_str(line)
            .map(LineAction::Request)
            .map_err(|e| e.to_string());
    }

    let tokens = shlex::split(line).ok_or_else(|| "Invalid quoting".to_string())?;
    let matches = build_line_cmd()
        .try_get_matches_from(tokens)
        .map_err(|e| e.to_string())?;
    matches_to_action(&matches)
}

fn matches_to_action(matches: &ArgMatches) -> Result<LineAction, String> {
    let (name, sub) = matches
        .subcommand()
        .ok_or_else(|| "No command provided".to_string())?;
    let arg = |key: &str| sub.get_one::<String>(key).cloned();

    match name {
        "open" => Ok(LineAction::Open {
            path: arg("path").unwrap_or_default(),
        }),
        "close" => Ok(LineAction::Close {
            id: arg("id").unwrap_or_default(),
        }),
        "save" => Ok(LineAction::Save {
            id: arg("id").unwrap_or_default(),
            path: arg("path"),
        }),
        "sessions" => Ok(LineAction::Sessions),
        "ops" => Ok(LineAction::Ops),
        other => Err(format!("Unknown command: {}", other)),
    }
}
