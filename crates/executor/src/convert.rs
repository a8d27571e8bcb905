//! Error conversion from engine error types.
//!
//! This module provides conversions from [`ScribeError`] to the executor's
//! [`Error`] type, plus a helper that attributes model-level input errors to
//! the parameter that carried the input.

use crate::Error;
use scribe_core::ScribeError;

/// Convert a ScribeError to an executor Error.
///
/// This preserves all error details while mapping to the appropriate
/// executor error variant.
impl From<ScribeError> for Error {
    fn from(err: ScribeError) -> Self {
        match err {
            ScribeError::SessionNotFound { session_id } => Error::SessionNotFound { session_id },
            ScribeError::SessionLimit { max } => Error::SessionLimit { max },

            ScribeError::NotFound { kind, name } => Error::EntityNotFound {
                kind: kind.to_string(),
                name,
            },
            ScribeError::AlreadyExists { kind, name } => Error::Conflict {
                reason: format!("{} '{}' already exists", kind, name),
            },
            ScribeError::Conflict { reason } => Error::Conflict { reason },

            ScribeError::IndexOutOfRange { name, index, len } => Error::InvalidParameter {
                name: name.to_string(),
                reason: format!("out of range: {} (length {})", index, len),
            },
            ScribeError::InvalidInput { message } => Error::InvalidInput { reason: message },

            ScribeError::SourceLoad { path, reason } => Error::SourceLoad { path, reason },
            err @ ScribeError::Io { .. } => Error::Io {
                reason: err.to_string(),
            },
            ScribeError::Serialization(reason) => Error::Serialization { reason },
            ScribeError::Internal(reason) => Error::Internal { reason },
        }
    }
}

/// Map a model error, naming `param` when the model rejected its value.
pub(crate) fn for_param(param: &'static str) -> impl Fn(ScribeError) -> Error {
    move |err| match err {
        ScribeError::InvalidInput { message } => Error::InvalidParameter {
            name: param.to_string(),
            reason: message,
        },
        other => Error::from(other),
    }
}
