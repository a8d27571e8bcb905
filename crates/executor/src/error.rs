//! Error types for command execution.
//!
//! All errors from request execution are represented by the [`Error`] enum.
//! These errors are:
//! - **Structured**: Each variant has typed fields for error details
//! - **Serializable**: Can be converted to/from JSON
//! - **Classified**: [`Error::kind`] groups variants into the four
//!   categories callers branch on

use serde::{Deserialize, Serialize};

/// Broad error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Caller mistake: bad or missing parameter, unknown operation, no source
    Usage,
    /// Session token or named document entity does not exist
    NotFound,
    /// Operation not possible in the current document or store state
    StateConflict,
    /// Infrastructure failure: loading, writing, serialization
    System,
}

/// Request execution errors.
///
/// # Categories
///
/// | Kind | Variants |
/// |------|----------|
/// | Usage | `MissingParameter`, `InvalidParameterType`, `InvalidParameter`, `InvalidInput`, `UnknownOperation`, `MissingSource`, `DuplicateOperation` |
/// | NotFound | `SessionNotFound`, `EntityNotFound` |
/// | StateConflict | `Conflict`, `SessionLimit` |
/// | System | `SourceLoad`, `Io`, `Serialization`, `Internal` |
///
/// `SessionNotFound` (stale token) and `EntityNotFound` (missing bookmark,
/// footnote, ...) share the NotFound kind but are separate variants.
///
/// # Example
///
/// ```ignore
/// match executor.execute(request) {
///     Ok(envelope) => { /* handle success */ }
///     Err(Error::SessionNotFound { session_id }) => {
///         println!("session {} expired, reopen it", session_id);
///     }
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    // ==================== Usage ====================
    /// Required parameter absent (or null)
    #[error("{name} is required")]
    MissingParameter { name: String },

    /// Parameter present with the wrong type
    #[error("{name} must be {expected}, got {actual}")]
    InvalidParameterType {
        name: String,
        expected: String,
        actual: String,
    },

    /// Parameter has the right type but violates a constraint
    #[error("{name} {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Input rejected without a single offending parameter
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// No handler registered under this name (carries the caller's spelling)
    #[error("unknown operation: '{operation}'")]
    UnknownOperation { operation: String },

    /// Neither path nor sessionId supplied
    #[error("{reason}")]
    MissingSource { reason: String },

    /// Two handlers registered under one canonical name
    #[error("operation already registered: {operation}")]
    DuplicateOperation { operation: String },

    // ==================== Not Found ====================
    /// Unknown, closed, or evicted session token
    #[error("session not found: {session_id}")]
    SessionNotFound { session_id: String },

    /// Named entity inside the document does not exist
    #[error("{kind} not found: {name}")]
    EntityNotFound { kind: String, name: String },

    // ==================== State Conflict ====================
    /// Current document state forbids the operation
    #[error("conflict: {reason}")]
    Conflict { reason: String },

    /// Session store is full
    #[error("session limit reached: at most {max} open sessions")]
    SessionLimit { max: usize },

    // ==================== System ====================
    /// Document could not be loaded from a path
    #[error("failed to load document '{path}': {reason}")]
    SourceLoad { path: String, reason: String },

    /// I/O error
    #[error("I/O error: {reason}")]
    Io { reason: String },

    /// Serialization error
    #[error("serialization error: {reason}")]
    Serialization { reason: String },

    /// Internal error (bug or invariant violation)
    #[error("internal error: {reason}")]
    Internal { reason: String },
}

impl Error {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingParameter { .. }
            | Error::InvalidParameterType { .. }
            | Error::InvalidParameter { .. }
            | Error::InvalidInput { .. }
            | Error::UnknownOperation { .. }
            | Error::MissingSource { .. }
            | Error::DuplicateOperation { .. } => ErrorKind::Usage,
            Error::SessionNotFound { .. } | Error::EntityNotFound { .. } => ErrorKind::NotFound,
            Error::Conflict { .. } | Error::SessionLimit { .. } => ErrorKind::StateConflict,
            Error::SourceLoad { .. }
            | Error::Io { .. }
            | Error::Serialization { .. }
            | Error::Internal { .. } => ErrorKind::System,
        }
    }

    /// Whether this is a not-found-class error.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub(crate) fn missing(name: impl Into<String>) -> Self {
        Error::MissingParameter { name: name.into() }
    }

    pub(crate) fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
