//! Output enum for handler results.
//!
//! Every handler produces exactly one output variant; the same operation
//! always produces the same variant (though the values depend on document
//! state).

use std::collections::BTreeMap;

use scribe_core::Footnote;
use serde::{Deserialize, Serialize};

use crate::types::*;

/// Successful handler results.
///
/// # Example
///
/// ```text
/// let envelope = executor.execute(Request::new("get_footnotes").session(&id))?;
///
/// match envelope.payload {
///     Output::Footnotes(notes) => println!("{} footnotes", notes.len()),
///     _ => unreachable!("get_footnotes always returns Footnotes"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    // ==================== Confirmations ====================
    /// Human-readable confirmation of a mutation
    Message(String),

    // ==================== Document ====================
    /// Summary counts
    DocumentInfo(DocumentInfo),

    /// Plain-text rendering
    Text(String),

    // ==================== Collections ====================
    /// Paragraphs with their positions
    Paragraphs(Vec<ParagraphInfo>),

    /// All footnotes, ordered by paragraph and then by id
    Footnotes(Vec<Footnote>),

    /// Bookmarks sorted by name
    Bookmarks(Vec<BookmarkInfo>),

    /// Tables with their cells
    Tables(Vec<TableInfo>),

    /// Document properties sorted by name
    Properties(BTreeMap<String, String>),
}

impl Output {
    /// The confirmation text, if this is a `Message`.
    pub fn as_message(&self) -> Option<&str> {
        match self {
            Output::Message(m) => Some(m),
            _ => None,
        }
    }

    pub(crate) fn message(text: impl Into<String>) -> Self {
        Output::Message(text.into())
    }
}
