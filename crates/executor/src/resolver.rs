//! Resolution of a call's target document.
//!
//! Precedence: a non-empty session id wins over a path. A path is loaded
//! fresh for the call (or, for creation-style operations, replaced by an
//! empty document without reading the file). With neither, the call fails
//! before any document is touched.

use std::path::PathBuf;
use std::sync::Arc;

use scribe_core::Document;
use scribe_engine::{load_document, SessionEntry, SessionStore};
use tracing::debug;

use crate::{Error, Result};

/// A resolved target.
#[derive(Debug)]
pub enum ResolvedSource {
    /// Resident session document; lock it to use it
    Session(Arc<SessionEntry>),
    /// Document owned by this call
    Ephemeral {
        /// Path the document was loaded from (or will be created at)
        path: PathBuf,
        /// Freshly loaded or freshly created document
        document: Document,
    },
}

/// Resolves `(path, session_id)` pairs against a session store.
#[derive(Debug, Clone, Copy)]
pub struct SourceResolver<'a> {
    sessions: &'a SessionStore,
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

impl<'a> SourceResolver<'a> {
    /// Resolver over `sessions`.
    pub fn new(sessions: &'a SessionStore) -> Self {
        Self { sessions }
    }

    /// Resolve a call's target.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session id is unknown (no path fallback)
    /// - `SourceLoad` if the path cannot be read or parsed
    /// - `MissingSource` if neither is given
    pub fn resolve(
        &self,
        path: Option<&str>,
        session_id: Option<&str>,
        creates_document: bool,
    ) -> Result<ResolvedSource> {
        if let Some(id) = non_empty(session_id) {
            if non_empty(path).is_some() {
                debug!(target: "scribe::dispatch", session_id = id, "Both sessionId and path given; using session");
            }
            let entry = self.sessions.get(id)?;
            return Ok(ResolvedSource::Session(entry));
        }

        if let Some(path) = non_empty(path) {
            let path = PathBuf::from(path);
            let document = if creates_document {
                Document::new()
            } else {
                load_document(&path)?
            };
            return Ok(ResolvedSource::Ephemeral { path, document });
        }

        Err(Error::MissingSource {
            reason: "path or sessionId is required".to_string(),
        })
    }
}
