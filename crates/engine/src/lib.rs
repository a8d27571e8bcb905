//! Document engine for Scribe
//!
//! This crate owns everything below request dispatch:
//! - Document load/save (JSON on disk, atomic writes)
//! - SessionStore: resident documents addressed by opaque tokens
//! - Idle-session eviction and its background sweeper
//! - ScribeConfig: `scribe.toml` settings
//!
//! The engine knows nothing about operation names or parameters; that is
//! the executor's job.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod io;
pub mod session;

pub use config::{ScribeConfig, CONFIG_FILE_NAME};
pub use io::{load_document, save_document};
pub use session::{SessionEntry, SessionId, SessionInfo, SessionStore};
