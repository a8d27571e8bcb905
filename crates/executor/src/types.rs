//! Supporting types for outputs.
//!
//! These are read-side views of the document model, shaped for callers
//! rather than for storage. All types are serializable.

use serde::{Deserialize, Serialize};

use scribe_core::{Cell, Document, Paragraph, ParagraphStyle, Table};

// =============================================================================
// Document
// =============================================================================

/// Summary counts for a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// Value of the `title` property, if set
    pub title: Option<String>,
    /// Number of paragraphs
    pub paragraphs: usize,
    /// Number of footnotes
    pub footnotes: usize,
    /// Number of bookmarks
    pub bookmarks: usize,
    /// Number of tables
    pub tables: usize,
    /// Number of properties
    pub properties: usize,
    /// Whether the document is protected
    pub protected: bool,
}

impl From<&Document> for DocumentInfo {
    fn from(doc: &Document) -> Self {
        DocumentInfo {
            title: doc.properties().get("title").cloned(),
            paragraphs: doc.paragraphs().len(),
            footnotes: doc.footnotes().len(),
            bookmarks: doc.bookmarks().len(),
            tables: doc.tables().len(),
            properties: doc.properties().len(),
            protected: doc.is_protected(),
        }
    }
}

// =============================================================================
// Paragraphs
// =============================================================================

/// A paragraph together with its position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphInfo {
    /// Position in the document
    pub index: usize,
    /// Paragraph text
    pub text: String,
    /// Paragraph style
    pub style: ParagraphStyle,
}

impl ParagraphInfo {
    pub(crate) fn new(index: usize, paragraph: &Paragraph) -> Self {
        ParagraphInfo {
            index,
            text: paragraph.text.clone(),
            style: paragraph.style,
        }
    }
}

// =============================================================================
// Bookmarks
// =============================================================================

/// A named anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkInfo {
    /// Bookmark name
    pub name: String,
    /// Anchored paragraph
    pub paragraph_index: usize,
}

// =============================================================================
// Tables
// =============================================================================

/// A table together with its position and shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableInfo {
    /// Position among the document's tables
    pub index: usize,
    /// Row count
    pub rows: usize,
    /// Column count
    pub columns: usize,
    /// Row-major cells
    pub cells: Vec<Vec<Cell>>,
}

impl TableInfo {
    pub(crate) fn new(index: usize, table: &Table) -> Self {
        TableInfo {
            index,
            rows: table.rows(),
            columns: table.columns(),
            cells: table.cells.clone(),
        }
    }
}
