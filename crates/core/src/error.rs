//! Error types for the document engine
//!
//! This module defines the errors raised below the executor layer: document
//! mutations, document I/O, and the session store. We use `thiserror` for
//! automatic `Display` and `Error` trait implementations.
//!
//! The executor converts every variant losslessly into its public,
//! serializable error type.

use thiserror::Error;

/// Result type alias for engine operations
pub type ScribeResult<T> = std::result::Result<T, ScribeError>;

/// Error types for the document engine
#[derive(Debug, Error)]
pub enum ScribeError {
    /// Session token is unknown, closed, or evicted
    #[error("session not found: {session_id}")]
    SessionNotFound {
        /// The token the caller supplied
        session_id: String,
    },

    /// Store is at its configured capacity
    #[error("session limit reached: at most {max} open sessions")]
    SessionLimit {
        /// Configured maximum
        max: usize,
    },

    /// Named entity inside a document does not exist
    #[error("{kind} not found: {name}")]
    NotFound {
        /// Entity kind ("bookmark", "footnote", ...)
        kind: &'static str,
        /// Entity name or id
        name: String,
    },

    /// Named entity inside a document already exists
    #[error("{kind} already exists: {name}")]
    AlreadyExists {
        /// Entity kind
        kind: &'static str,
        /// Entity name
        name: String,
    },

    /// Index outside the bounds of the addressed collection
    #[error("{name} out of range: {index} (length {len})")]
    IndexOutOfRange {
        /// Parameter-style name of the index ("paragraphIndex", "row", ...)
        name: &'static str,
        /// Requested index
        index: usize,
        /// Current collection length
        len: usize,
    },

    /// Operation cannot proceed in the document's current state
    #[error("conflict: {reason}")]
    Conflict {
        /// What prevented the operation
        reason: String,
    },

    /// Input rejected by the document model
    #[error("invalid input: {message}")]
    InvalidInput {
        /// Human-readable description
        message: String,
    },

    /// Document at a path could not be loaded
    #[error("failed to load document '{path}': {reason}")]
    SourceLoad {
        /// Path that was being loaded
        path: String,
        /// Underlying cause
        reason: String,
    },

    /// I/O failure while persisting
    #[error("I/O error on '{path}': {source}")]
    Io {
        /// Path being written or read
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Internal invariant violation
    #[error("internal error: {0}")]
    Internal(String),
}

impl ScribeError {
    /// Construct a `Conflict` error.
    pub fn conflict(reason: impl Into<String>) -> Self {
        ScribeError::Conflict {
            reason: reason.into(),
        }
    }

    /// Construct an `InvalidInput` error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ScribeError::InvalidInput {
            message: message.into(),
        }
    }

    /// Construct a `NotFound` error.
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        ScribeError::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Construct an `Io` error for `path`.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        ScribeError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for ScribeError {
    fn from(e: serde_json::Error) -> Self {
        ScribeError::Serialization(e.to_string())
    }
}
