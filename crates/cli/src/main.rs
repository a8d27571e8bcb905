//! Scribe CLI - line-oriented front end for Scribe documents.
//!
//! Two modes:
//! - **REPL mode**: `scribe [flags]` - interactive prompt (if stdin is TTY)
//! - **Pipe mode**: `cat requests.jsonl | scribe` - line-by-line from stdin
//!
//! Each line is either a JSON request object or a line command
//! (`open`, `close`, `save`, `sessions`, `ops`).

mod commands;
mod format;
mod parse;
mod repl;

use std::io::IsTerminal;
use std::path::Path;
use std::process;

use scribe_executor::{Executor, ScribeConfig, CONFIG_FILE_NAME};
use tracing::Level;

use commands::build_cli;
use format::OutputMode;

fn main() {
    let matches = build_cli().get_matches();

    init_tracing(matches.get_count("verbose"));

    if matches.get_flag("init-config") {
        let path = config_path(&matches);
        match ScribeConfig::write_default_if_missing(Path::new(&path)) {
            Ok(()) => println!("{}", path),
            Err(e) => {
                eprintln!("Failed to write config: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    let output_mode = if matches.get_flag("json") {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let executor = match load_config(&matches).and_then(|config| {
        Executor::from_config(&config).map_err(|e| format!("Failed to start: {}", e))
    }) {
        Ok(executor) => executor,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let exit_code = if std::io::stdin().is_terminal() {
        repl::run_repl(&executor, output_mode);
        0
    } else {
        repl::run_pipe(&executor, output_mode)
    };

    executor.sessions().shutdown();
    process::exit(exit_code);
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => return,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn config_path(matches: &clap::ArgMatches) -> String {
    matches
        .get_one::<String>("config")
        .cloned()
        .unwrap_or_else(|| CONFIG_FILE_NAME.to_string())
}

fn load_config(matches: &clap::ArgMatches) -> Result<ScribeConfig, String> {
    let explicit = matches.get_one::<String>("config").is_some();
    let path = config_path(matches);
    let path = Path::new(&path);

    if !explicit && !path.exists() {
        return Ok(ScribeConfig::default());
    }
    ScribeConfig::from_file(path).map_err(|e| format!("Failed to load config: {}", e))
}
