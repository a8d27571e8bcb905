//! Per-call operation context.
//!
//! An [`OperationContext`] lives for exactly one dispatched call. It carries
//! the target document, where it came from, and whether the handler changed
//! it. It is never shared between calls.

use std::path::{Path, PathBuf};

use scribe_core::{Document, ScribeResult};
use scribe_engine::SessionId;

use crate::Result;

/// Where the document of a call came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A resident document in the session store
    Session(SessionId),
    /// A document loaded (or created) for this call only
    Ephemeral {
        /// Path the document was loaded from
        path: PathBuf,
        /// Alternate write target
        output_path: Option<PathBuf>,
    },
}

/// Mutable state for one call.
pub struct OperationContext<'a> {
    document: &'a mut Document,
    source: Source,
    modified: bool,
}

impl<'a> OperationContext<'a> {
    /// Wrap a document for one call. Starts unmodified.
    pub fn new(document: &'a mut Document, source: Source) -> Self {
        Self {
            document,
            source,
            modified: false,
        }
    }

    /// Read access to the document.
    pub fn document(&self) -> &Document {
        &*self.document
    }

    /// Write access to the document. Callers that change it must also call
    /// [`mark_modified`](Self::mark_modified), or use [`edit`](Self::edit).
    pub fn document_mut(&mut self) -> &mut Document {
        &mut *self.document
    }

    /// Run a model mutation and mark the document modified if it succeeded.
    ///
    /// Model mutations validate before touching state, so a failed `f`
    /// leaves the document as it was.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut Document) -> ScribeResult<R>) -> Result<R> {
        let out = f(&mut *self.document)?;
        self.modified = true;
        Ok(out)
    }

    /// Swap in a whole new document (creation-style operations).
    pub fn replace_document(&mut self, document: Document) {
        *self.document = document;
        self.modified = true;
    }

    /// Record that the document changed. Idempotent.
    pub fn mark_modified(&mut self) {
        self.modified = true;
    }

    /// Whether the handler changed the document.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Where the document came from.
    pub fn source(&self) -> &Source {
        &self.source
    }

    /// Whether the document is session-resident.
    pub fn is_session(&self) -> bool {
        matches!(self.source, Source::Session(_))
    }

    /// Session token, for session-resident documents.
    pub fn session_id(&self) -> Option<&SessionId> {
        match &self.source {
            Source::Session(id) => Some(id),
            Source::Ephemeral { .. } => None,
        }
    }

    /// Source path, for ephemeral documents.
    pub fn source_path(&self) -> Option<&Path> {
        match &self.source {
            Source::Ephemeral { path, .. } => Some(path),
            Source::Session(_) => None,
        }
    }

    /// Where a modified ephemeral document will be written.
    pub fn write_target(&self) -> Option<&Path> {
        match &self.source {
            Source::Ephemeral { path, output_path } => Some(output_path.as_deref().unwrap_or(path)),
            Source::Session(_) => None,
        }
    }
}

impl std::fmt::Debug for OperationContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationContext")
            .field("source", &self.source)
            .field("modified", &self.modified)
            .finish_non_exhaustive()
    }
}
