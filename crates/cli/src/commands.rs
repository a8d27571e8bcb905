//! Clap command trees.
//!
//! [`build_cli`] parses process arguments; [`build_line_cmd`] parses the
//! session-management line commands typed at the prompt or piped in.

use clap::{Arg, ArgAction, Command};

/// Process-level arguments.
pub fn build_cli() -> Command {
    Command::new("scribe")
        .about("Edit Scribe documents with JSON requests read from stdin")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("FILE")
                .help("Configuration file (default: ./scribe.toml if present)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("JSON output mode: one envelope or error object per line")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log to stderr (-v info, -vv debug, -vvv trace)")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("init-config")
                .long("init-config")
                .help("Write a default scribe.toml if none exists, then exit")
                .action(ArgAction::SetTrue),
        )
}

/// Line commands. Lines that start with `{` are requests and never reach
/// this parser.
pub fn build_line_cmd() -> Command {
    Command::new("line")
        .multicall(true)
        .subcommand_required(true)
        .subcommand(
            Command::new("open")
                .about("Open a document as a session and print its id")
                .arg(Arg::new("path").required(true).help("Document path")),
        )
        .subcommand(
            Command::new("close")
                .about("Close a session, discarding unsaved changes")
                .arg(Arg::new("id").required(true).help("Session id")),
        )
        .subcommand(
            Command::new("save")
                .about("Write a session's document to disk")
                .arg(Arg::new("id").required(true).help("Session id"))
                .arg(Arg::new("path").help("Target path (default: the source path)")),
        )
        .subcommand(Command::new("sessions").about("List open sessions"))
        .subcommand(Command::new("ops").about("List registered operations"))
}
