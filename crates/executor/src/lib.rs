//! # Scribe Executor
//!
//! Request dispatch and session lifecycle for editable documents.
//!
//! This is the only crate callers need to import. It provides:
//! - [`Executor`] - routes [`Request`]s to handlers and manages sessions
//! - [`HandlerRegistry`]/[`Handler`] - case-insensitive operation table
//! - [`ParameterBag`] - typed access to loosely typed parameters
//! - [`Envelope`]/[`Output`] - results plus session metadata
//!
//! ## Quick Start
//!
//! ```text
//! use scribe_executor::{Executor, Request};
//!
//! let executor = Executor::default();
//!
//! // One-shot edit: load, mutate, write back
//! executor.execute(
//!     Request::new("add_paragraph").path("notes.json").param("text", "Hello"),
//! )?;
//!
//! // Resident edits: load once, many calls, explicit save
//! let id = executor.open_session("notes.json")?;
//! executor.execute(Request::new("add_bookmark").session(&id)
//!     .param("name", "start").param("paragraphIndex", 0))?;
//! executor.save_session(&id, None)?;
//! ```
//!
//! ## Targets
//!
//! | Given | Document | Persisted |
//! |-------|----------|-----------|
//! | `sessionId` | resident session document | only by `save_session` |
//! | `path` only | loaded for this call | after the call, if modified |
//! | neither | - | `MissingSource` error |
//!
//! A session id always wins over a path.

#![warn(missing_docs)]

mod context;
mod convert;
mod envelope;
mod error;
mod executor;
mod output;
mod params;
mod registry;
mod request;
mod resolver;
mod session;
mod types;

// Handler modules
pub mod handlers;


// =============================================================================
// Public API
// =============================================================================

pub use context::{OperationContext, Source};
pub use envelope::Envelope;
pub use error::{Error, ErrorKind};
pub use executor::Executor;
pub use output::Output;
pub use params::{FromParam, ParameterBag};
pub use registry::{Handler, HandlerRegistry};
pub use request::Request;
pub use resolver::{ResolvedSource, SourceResolver};
pub use session::Session;
pub use types::*;

// Re-exports from the lower layers
pub use scribe_core::{
    Cell, Color, Document, Footnote, Paragraph, ParagraphStyle, Table, Value,
};
pub use scribe_engine::{ScribeConfig, SessionId, SessionInfo, SessionStore, CONFIG_FILE_NAME};

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
