//! Core types for Scribe
//!
//! This crate defines the foundational types used throughout the system:
//! - Value: Loosely-typed value enum for caller-supplied parameters
//! - ScribeError: Error type for document and session operations
//! - Document: The editable document model and its entities

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod error;
pub mod value;

pub use document::{
    Cell, CellColor, Color, Document, Footnote, Paragraph, ParagraphStyle, Table,
    MAX_TABLE_DIMENSION,
};
pub use error::{ScribeError, ScribeResult};
pub use value::Value;
