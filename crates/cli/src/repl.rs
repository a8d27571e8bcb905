//! Input loops.
//!
//! Interactive mode: rustyline prompt with history.
//! Pipe mode: read lines from stdin, execute each, exit non-zero if any
//! line failed.

use std::io::{self, BufRead};
use std::path::Path;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use scribe_executor::Executor;

use crate::commands::build_line_cmd;
use crate::format::{
    format_envelope, format_error, format_ok, format_opened, format_ops, format_sessions,
    format_usage_error, OutputMode,
};
use crate::parse::{check_meta_command, parse_line, LineAction, MetaCommand};

/// Run the interactive prompt until `quit` or end of input.
pub fn run_repl(executor: &Executor, mode: OutputMode) {
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("(error) cannot start line editor: {}", e);
            return;
        }
    };

    let history_path = history_file();
    if let Some(ref path) = history_path {
        let _ = rl.load_history(path);
    }

    loop {
        match rl.readline("scribe> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                match check_meta_command(trimmed) {
                    Some(MetaCommand::Quit) => break,
                    Some(MetaCommand::Help) => print_help(),
                    None => {
                        execute_line(trimmed, executor, mode);
                    }
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("(error) {:?}", err);
                break;
            }
        }
    }

    if let Some(ref path) = history_path {
        let _ = rl.save_history(path);
    }
}

/// Run in pipe mode. Returns the process exit code.
pub fn run_pipe(executor: &Executor, mode: OutputMode) -> i32 {
    let stdin = io::stdin();
    let mut exit_code = 0;

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if !execute_line(trimmed, executor, mode) {
            exit_code = 1;
        }
    }

    exit_code
}

/// Execute one line. Results go to stdout, errors to stderr in human mode
/// and to stdout in JSON mode (so each input line yields one output line).
/// Returns true on success.
pub fn execute_line(line: &str, executor: &Executor, mode: OutputMode) -> bool {
    let action = match parse_line(line) {
        Ok(action) => action,
        Err(message) => {
            emit_error(format_usage_error(message.trim_end(), mode), mode);
            return false;
        }
    };

    let result = match action {
        LineAction::Request(request) => executor
            .execute(request)
            .map(|envelope| format_envelope(&envelope, mode)),
        LineAction::Open { path } => executor
            .open_session(&path)
            .map(|id| format_opened(&id, mode)),
        LineAction::Close { id } => executor
            .close_session(&id)
            .map(|()| format_ok(&format!("Closed {}", id), mode)),
        LineAction::Save { id, path } => executor
            .save_session(&id, path.as_deref().map(Path::new))
            .map(|written| format_ok(&format!("Saved {} to {}", id, written.display()), mode)),
        LineAction::Sessions => Ok(format_sessions(&executor.list_sessions(), mode)),
        LineAction::Ops => Ok(format_ops(&executor.registry().operations(), mode)),
    };

    match result {
        Ok(text) => {
            if !text.is_empty() {
                println!("{}", text);
            }
            true
        }
        Err(e) => {
            emit_error(format_error(&e, mode), mode);
            false
        }
    }
}

fn emit_error(text: String, mode: OutputMode) {
    match mode {
        OutputMode::Json => println!("{}", text),
        OutputMode::Human => eprintln!("{}", text),
    }
}

fn history_file() -> Option<String> {
    std::env::var("HOME")
        .ok()
        .map(|h| format!("{}/.scribe_history", h))
}

fn print_help() {
    println!("Enter a JSON request on one line, for example:");
    println!("  {{\"operation\": \"add_paragraph\", \"path\": \"doc.json\", \"text\": \"Hello\"}}");
    println!();
    println!("{}", build_line_cmd().render_help());
    println!("Meta commands: help, quit, exit");
}
