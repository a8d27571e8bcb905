//! Handle bound to one open session.
//!
//! A [`Session`] wraps an [`Executor`] and a session token so callers can
//! issue a run of operations without repeating the token.
//!
//! # Usage
//!
//! ```ignore
//! let session = executor.session("report.json")?;
//! session.execute("add_paragraph", ParameterBag::new().with("text", "Intro"))?;
//! session.save(None)?;
//! session.close()?;
//! ```
//!
//! Dropping a handle does not close the session; the store's idle sweeper
//! (or an explicit [`Session::close`]) does.

use std::path::{Path, PathBuf};

use scribe_core::Document;
use scribe_engine::SessionId;

use crate::{Envelope, Executor, Output, ParameterBag, Request, Result};

/// An executor bound to one session token.
#[derive(Debug, Clone)]
pub struct Session {
    executor: Executor,
    id: SessionId,
}

impl Session {
    /// Bind `executor` to an already open session.
    pub fn new(executor: Executor, id: SessionId) -> Self {
        Self { executor, id }
    }

    /// Session token.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Run `operation` against this session.
    pub fn execute(&self, operation: &str, params: ParameterBag) -> Result<Output> {
        self.execute_envelope(operation, params)
            .map(|envelope| envelope.payload)
    }

    /// Run `operation` against this session, keeping the envelope.
    pub fn execute_envelope(&self, operation: &str, params: ParameterBag) -> Result<Envelope> {
        self.executor.execute(
            Request::new(operation)
                .session(self.id.as_str())
                .params(params),
        )
    }

    /// Snapshot of the resident document.
    pub fn document(&self) -> Result<Document> {
        self.executor.get_document(self.id.as_str())
    }

    /// Save to `path`, or back to the source path.
    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf> {
        self.executor.save_session(self.id.as_str(), path)
    }

    /// Close the session, discarding unsaved changes.
    pub fn close(self) -> Result<()> {
        self.executor.close_session(self.id.as_str())
    }
}
