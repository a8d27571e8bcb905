//! Scribe - request dispatch and session lifecycle for editable documents
//!
//! Scribe routes named operations ("add_footnote", "get_paragraphs", ...)
//! to handlers, against either a document loaded for a single call or a
//! resident session document addressed by an opaque token.
//!
//! # Quick Start
//!
//! ```ignore
//! use scribe::{Executor, Request};
//!
//! let executor = Executor::default();
//! let id = executor.open_session("report.json")?;
//!
//! executor.execute(
//!     Request::new("add_footnote")
//!         .session(&id)
//!         .param("paragraphIndex", 0)
//!         .param("text", "See appendix"),
//! )?;
//!
//! executor.save_session(&id, None)?;
//! executor.close_session(&id)?;
//! ```
//!
//! # Architecture
//!
//! All operations go through the [`Executor`]. Document storage and the
//! session store live in lower crates and are exposed only through the
//! executor's re-exports.

// Re-export the public API from scribe-executor
pub use scribe_executor::*;
