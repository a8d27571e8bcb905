//! Document data model
//!
//! A [`Document`] is a flat sequence of paragraphs plus the entities that
//! hang off it: footnotes and bookmarks (anchored to a paragraph index),
//! tables with colourable cells, free-form properties, and an optional
//! password protection marker.
//!
//! Every mutating method validates its whole input before touching any
//! field, so an `Err` return always leaves the document unchanged.
//!
//! ## Anchors
//!
//! Footnotes and bookmarks store the index of the paragraph they belong to.
//! Inserting or removing a paragraph shifts those anchors so they keep
//! pointing at the same paragraph; removing a paragraph drops the footnotes
//! and bookmarks anchored to it.
//!
//! ## Loading
//!
//! Deserialization goes through [`Document::validate`]: ragged or oversized
//! tables, dangling anchors, and duplicate footnote ids are rejected, and the
//! footnote id counter is raised past every stored id.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{ScribeError, ScribeResult};

/// Maximum rows or columns in a single table.
pub const MAX_TABLE_DIMENSION: usize = 256;

// =============================================================================
// Paragraph styles
// =============================================================================

/// Paragraph style.
///
/// Parsing is strict: unknown names are rejected rather than mapped onto
/// `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParagraphStyle {
    /// Body text
    #[default]
    Normal,
    /// Document title
    Title,
    /// Top-level heading
    Heading1,
    /// Second-level heading
    Heading2,
    /// Third-level heading
    Heading3,
    /// Block quotation
    Quote,
    /// Bulleted list item
    ListItem,
}

impl ParagraphStyle {
    /// Every accepted style name, in canonical spelling.
    pub const NAMES: &'static [&'static str] = &[
        "normal", "title", "heading1", "heading2", "heading3", "quote", "list_item",
    ];

    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParagraphStyle::Normal => "normal",
            ParagraphStyle::Title => "title",
            ParagraphStyle::Heading1 => "heading1",
            ParagraphStyle::Heading2 => "heading2",
            ParagraphStyle::Heading3 => "heading3",
            ParagraphStyle::Quote => "quote",
            ParagraphStyle::ListItem => "list_item",
        }
    }
}

impl FromStr for ParagraphStyle {
    type Err = ScribeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        match folded.as_str() {
            "normal" => Ok(ParagraphStyle::Normal),
            "title" => Ok(ParagraphStyle::Title),
            "heading1" => Ok(ParagraphStyle::Heading1),
            "heading2" => Ok(ParagraphStyle::Heading2),
            "heading3" => Ok(ParagraphStyle::Heading3),
            "quote" => Ok(ParagraphStyle::Quote),
            "listitem" => Ok(ParagraphStyle::ListItem),
            _ => Err(ScribeError::invalid_input(format!(
                "unknown style '{}', expected one of: {}",
                s,
                ParagraphStyle::NAMES.join(", ")
            ))),
        }
    }
}

impl fmt::Display for ParagraphStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Colors
// =============================================================================

/// Cell shading colour, normalized to `#RRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

const NAMED_COLORS: &[(&str, &str)] = &[
    ("black", "#000000"),
    ("white", "#FFFFFF"),
    ("red", "#FF0000"),
    ("green", "#00FF00"),
    ("blue", "#0000FF"),
    ("yellow", "#FFFF00"),
    ("orange", "#FFA500"),
    ("purple", "#800080"),
    ("gray", "#808080"),
    ("grey", "#808080"),
];

impl Color {
    /// Hex form, `#RRGGBB`.
    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

impl FromStr for Color {
    type Err = ScribeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();
        if let Some((_, hex)) = NAMED_COLORS.iter().find(|(name, _)| *name == lower) {
            return Ok(Color((*hex).to_string()));
        }
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Ok(Color(format!("#{}", digits.to_ascii_uppercase())));
        }
        Err(ScribeError::invalid_input(format!(
            "unknown color '{}', expected a color name or #RRGGBB",
            s
        )))
    }
}

// =============================================================================
// Entities
// =============================================================================

/// A paragraph of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Paragraph text
    pub text: String,
    /// Paragraph style
    #[serde(default)]
    pub style: ParagraphStyle,
}

/// A footnote attached to a paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Footnote {
    /// Stable id, unique within the document
    pub id: u32,
    /// Index of the paragraph carrying the reference mark
    pub paragraph_index: usize,
    /// Footnote text
    pub text: String,
}

/// A table cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cell {
    /// Cell text
    #[serde(default)]
    pub text: String,
    /// Shading colour, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

/// A rectangular table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Row-major cells; every row has the same length
    pub cells: Vec<Vec<Cell>>,
}

impl Table {
    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }
}

/// One entry of a bulk cell-colour update.
#[derive(Debug, Clone, PartialEq)]
pub struct CellColor {
    /// Row index
    pub row: usize,
    /// Column index
    pub column: usize,
    /// Colour to apply
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Protection {
    digest: String,
}

fn password_digest(password: &str) -> String {
    Sha256::digest(password.as_bytes())
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

// =============================================================================
// Document
// =============================================================================

/// An editable document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "StoredDocument")]
pub struct Document {
    paragraphs: Vec<Paragraph>,
    footnotes: Vec<Footnote>,
    bookmarks: BTreeMap<String, usize>,
    tables: Vec<Table>,
    properties: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    protection: Option<Protection>,
    next_footnote_id: u32,
}

/// Document as read from disk, before its invariants are checked.
#[derive(Deserialize)]
struct StoredDocument {
    #[serde(default)]
    paragraphs: Vec<Paragraph>,
    #[serde(default)]
    footnotes: Vec<Footnote>,
    #[serde(default)]
    bookmarks: BTreeMap<String, usize>,
    #[serde(default)]
    tables: Vec<Table>,
    #[serde(default)]
    properties: BTreeMap<String, String>,
    #[serde(default)]
    protection: Option<Protection>,
    #[serde(default)]
    next_footnote_id: u32,
}

impl TryFrom<StoredDocument> for Document {
    type Error = ScribeError;

    fn try_from(stored: StoredDocument) -> ScribeResult<Self> {
        let highest_id = stored.footnotes.iter().map(|f| f.id).max().unwrap_or(0);
        let mut footnotes = stored.footnotes;
        footnotes.sort_by_key(|f| (f.paragraph_index, f.id));

        let doc = Document {
            paragraphs: stored.paragraphs,
            footnotes,
            bookmarks: stored.bookmarks,
            tables: stored.tables,
            properties: stored.properties,
            protection: stored.protection,
            next_footnote_id: stored.next_footnote_id.max(highest_id),
        };
        doc.validate()?;
        Ok(doc)
    }
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty document with a `title` property.
    pub fn with_title(title: impl Into<String>) -> Self {
        let mut doc = Self::new();
        doc.properties.insert("title".to_string(), title.into());
        doc
    }

    // -------------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------------

    /// All paragraphs in order.
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// All footnotes, ordered by paragraph then id.
    pub fn footnotes(&self) -> &[Footnote] {
        &self.footnotes
    }

    /// Bookmark name → paragraph index.
    pub fn bookmarks(&self) -> &BTreeMap<String, usize> {
        &self.bookmarks
    }

    /// All tables in order.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Document properties.
    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// Whether the document is password protected.
    pub fn is_protected(&self) -> bool {
        self.protection.is_some()
    }

    /// Plain-text rendering: one line per paragraph, table cells tab
    /// separated, footnotes listed at the end as `[id] text`.
    pub fn plain_text(&self) -> String {
        let mut lines: Vec<String> = self.paragraphs.iter().map(|p| p.text.clone()).collect();
        for table in &self.tables {
            for row in &table.cells {
                lines.push(
                    row.iter()
                        .map(|c| c.text.as_str())
                        .collect::<Vec<_>>()
                        .join("\t"),
                );
            }
        }
        if !self.footnotes.is_empty() {
            lines.push(String::new());
            for note in &self.footnotes {
                lines.push(format!("[{}] {}", note.id, note.text));
            }
        }
        lines.join("\n")
    }

    /// Whether any paragraph, footnote, cell, bookmark name, or property
    /// contains `needle`.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.paragraphs.iter().any(|p| p.text.contains(needle))
            || self.footnotes.iter().any(|f| f.text.contains(needle))
            || self.bookmarks.keys().any(|k| k.contains(needle))
            || self
                .tables
                .iter()
                .flat_map(|t| t.cells.iter().flatten())
                .any(|c| c.text.contains(needle))
            || self.properties.values().any(|v| v.contains(needle))
    }

    // -------------------------------------------------------------------------
    // Guards
    // -------------------------------------------------------------------------

    /// Check structural invariants.
    ///
    /// Tables must be rectangular with 1..=[`MAX_TABLE_DIMENSION`] rows and
    /// columns. Footnote and bookmark anchors must address existing
    /// paragraphs. Footnote ids must be unique, non-zero, and not above the
    /// id counter.
    pub fn validate(&self) -> ScribeResult<()> {
        let bounds = 1..=MAX_TABLE_DIMENSION;
        for (i, table) in self.tables.iter().enumerate() {
            let (rows, columns) = (table.rows(), table.columns());
            if !bounds.contains(&rows) || !bounds.contains(&columns) {
                return Err(ScribeError::invalid_input(format!(
                    "table {} is {}x{}; rows and columns must be between 1 and {}",
                    i, rows, columns, MAX_TABLE_DIMENSION
                )));
            }
            if let Some((r, row)) = table
                .cells
                .iter()
                .enumerate()
                .find(|(_, row)| row.len() != columns)
            {
                return Err(ScribeError::invalid_input(format!(
                    "table {} is not rectangular: row {} has {} cells, expected {}",
                    i,
                    r,
                    row.len(),
                    columns
                )));
            }
        }

        let len = self.paragraphs.len();
        let mut ids = HashSet::with_capacity(self.footnotes.len());
        for note in &self.footnotes {
            if note.paragraph_index >= len {
                return Err(ScribeError::invalid_input(format!(
                    "footnote {} is anchored to paragraph {} of {}",
                    note.id, note.paragraph_index, len
                )));
            }
            if note.id == 0 || note.id > self.next_footnote_id || !ids.insert(note.id) {
                return Err(ScribeError::invalid_input(format!(
                    "footnote id {} is zero, duplicated, or above the id counter",
                    note.id
                )));
            }
        }

        if let Some((name, anchor)) = self.bookmarks.iter().find(|(_, anchor)| **anchor >= len) {
            return Err(ScribeError::invalid_input(format!(
                "bookmark '{}' is anchored to paragraph {} of {}",
                name, anchor, len
            )));
        }
        Ok(())
    }

    /// Fail with a conflict if the document is protected.
    pub fn ensure_editable(&self) -> ScribeResult<()> {
        if self.is_protected() {
            return Err(ScribeError::conflict(
                "document is protected; unprotect it before editing",
            ));
        }
        Ok(())
    }

    /// Fail unless `index` addresses an existing paragraph.
    pub fn check_paragraph_index(&self, index: usize) -> ScribeResult<()> {
        if index >= self.paragraphs.len() {
            return Err(ScribeError::IndexOutOfRange {
                name: "paragraphIndex",
                index,
                len: self.paragraphs.len(),
            });
        }
        Ok(())
    }

    fn check_table_index(&self, index: usize) -> ScribeResult<&Table> {
        self.tables.get(index).ok_or(ScribeError::IndexOutOfRange {
            name: "tableIndex",
            index,
            len: self.tables.len(),
        })
    }

    // -------------------------------------------------------------------------
    // Paragraphs
    // -------------------------------------------------------------------------

    /// Insert a paragraph at `index` (append when `None`). Returns the index
    /// the paragraph landed at.
    pub fn insert_paragraph(
        &mut self,
        index: Option<usize>,
        text: impl Into<String>,
        style: ParagraphStyle,
    ) -> ScribeResult<usize> {
        self.ensure_editable()?;
        let len = self.paragraphs.len();
        let at = index.unwrap_or(len);
        if at > len {
            return Err(ScribeError::IndexOutOfRange {
                name: "index",
                index: at,
                len,
            });
        }

        self.paragraphs.insert(
            at,
            Paragraph {
                text: text.into(),
                style,
            },
        );
        for note in &mut self.footnotes {
            if note.paragraph_index >= at {
                note.paragraph_index += 1;
            }
        }
        for anchor in self.bookmarks.values_mut() {
            if *anchor >= at {
                *anchor += 1;
            }
        }
        Ok(at)
    }

    /// Replace the text and/or style of an existing paragraph.
    pub fn edit_paragraph(
        &mut self,
        index: usize,
        text: Option<String>,
        style: Option<ParagraphStyle>,
    ) -> ScribeResult<()> {
        self.ensure_editable()?;
        self.check_paragraph_index(index)?;
        let paragraph = &mut self.paragraphs[index];
        if let Some(text) = text {
            paragraph.text = text;
        }
        if let Some(style) = style {
            paragraph.style = style;
        }
        Ok(())
    }

    /// Remove a paragraph, dropping footnotes and bookmarks anchored to it.
    pub fn remove_paragraph(&mut self, index: usize) -> ScribeResult<Paragraph> {
        self.ensure_editable()?;
        self.check_paragraph_index(index)?;

        let removed = self.paragraphs.remove(index);
        self.footnotes.retain(|f| f.paragraph_index != index);
        for note in &mut self.footnotes {
            if note.paragraph_index > index {
                note.paragraph_index -= 1;
            }
        }
        self.bookmarks.retain(|_, anchor| *anchor != index);
        for anchor in self.bookmarks.values_mut() {
            if *anchor > index {
                *anchor -= 1;
            }
        }
        Ok(removed)
    }

    // -------------------------------------------------------------------------
    // Footnotes
    // -------------------------------------------------------------------------

    /// Attach a footnote to a paragraph. Returns the new footnote id.
    pub fn add_footnote(
        &mut self,
        paragraph_index: usize,
        text: impl Into<String>,
    ) -> ScribeResult<u32> {
        self.ensure_editable()?;
        self.check_paragraph_index(paragraph_index)?;

        let id = self
            .next_footnote_id
            .checked_add(1)
            .ok_or_else(|| ScribeError::conflict("no footnote ids left in this document"))?;
        self.next_footnote_id = id;
        let position = self
            .footnotes
            .partition_point(|f| f.paragraph_index <= paragraph_index);
        self.footnotes.insert(
            position,
            Footnote {
                id,
                paragraph_index,
                text: text.into(),
            },
        );
        Ok(id)
    }

    /// Remove a footnote by id.
    pub fn remove_footnote(&mut self, id: u32) -> ScribeResult<Footnote> {
        self.ensure_editable()?;
        let position = self
            .footnotes
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| ScribeError::not_found("footnote", id.to_string()))?;
        Ok(self.footnotes.remove(position))
    }

    // -------------------------------------------------------------------------
    // Bookmarks
    // -------------------------------------------------------------------------

    /// Add a named bookmark on a paragraph.
    pub fn add_bookmark(&mut self, name: &str, paragraph_index: usize) -> ScribeResult<()> {
        self.ensure_editable()?;
        if name.trim().is_empty() {
            return Err(ScribeError::invalid_input("bookmark name must not be empty"));
        }
        if self.bookmarks.contains_key(name) {
            return Err(ScribeError::AlreadyExists {
                kind: "bookmark",
                name: name.to_string(),
            });
        }
        self.check_paragraph_index(paragraph_index)?;
        self.bookmarks.insert(name.to_string(), paragraph_index);
        Ok(())
    }

    /// Remove a bookmark, returning the paragraph it pointed at.
    pub fn remove_bookmark(&mut self, name: &str) -> ScribeResult<usize> {
        self.ensure_editable()?;
        self.bookmarks
            .remove(name)
            .ok_or_else(|| ScribeError::not_found("bookmark", name))
    }

    // -------------------------------------------------------------------------
    // Tables
    // -------------------------------------------------------------------------

    /// Append an empty `rows` x `columns` table. Returns its index.
    pub fn add_table(&mut self, rows: usize, columns: usize) -> ScribeResult<usize> {
        self.ensure_editable()?;
        for (name, n) in [("rows", rows), ("columns", columns)] {
            if n == 0 || n > MAX_TABLE_DIMENSION {
                return Err(ScribeError::invalid_input(format!(
                    "{} must be between 1 and {}, got {}",
                    name, MAX_TABLE_DIMENSION, n
                )));
            }
        }
        self.tables.push(Table {
            cells: vec![vec![Cell::default(); columns]; rows],
        });
        Ok(self.tables.len() - 1)
    }

    /// Apply a batch of cell colours. Every coordinate is checked before any
    /// cell changes.
    pub fn set_cell_colors(&mut self, table_index: usize, updates: &[CellColor]) -> ScribeResult<()> {
        self.ensure_editable()?;
        let table = self.check_table_index(table_index)?;
        for update in updates {
            let row = table.cells.get(update.row).ok_or(ScribeError::IndexOutOfRange {
                name: "row",
                index: update.row,
                len: table.rows(),
            })?;
            if update.column >= row.len() {
                return Err(ScribeError::IndexOutOfRange {
                    name: "column",
                    index: update.column,
                    len: row.len(),
                });
            }
        }

        let table = &mut self.tables[table_index];
        for update in updates {
            table.cells[update.row][update.column].color = Some(update.color.clone());
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------------------

    /// Set a document property, returning the previous value.
    pub fn set_property(&mut self, name: &str, value: impl Into<String>) -> ScribeResult<Option<String>> {
        self.ensure_editable()?;
        if name.trim().is_empty() {
            return Err(ScribeError::invalid_input("property name must not be empty"));
        }
        Ok(self.properties.insert(name.to_string(), value.into()))
    }

    // -------------------------------------------------------------------------
    // Protection
    // -------------------------------------------------------------------------

    /// Protect the document with a password.
    pub fn protect(&mut self, password: &str) -> ScribeResult<()> {
        if self.is_protected() {
            return Err(ScribeError::conflict("document is already protected"));
        }
        if password.is_empty() {
            return Err(ScribeError::invalid_input("password must not be empty"));
        }
        self.protection = Some(Protection {
            digest: password_digest(password),
        });
        Ok(())
    }

    /// Remove protection. The password must match.
    pub fn unprotect(&mut self, password: &str) -> ScribeResult<()> {
        match &self.protection {
            None => Err(ScribeError::conflict("document is not protected")),
            Some(p) if p.digest != password_digest(password) => {
                Err(ScribeError::conflict("incorrect password"))
            }
            Some(_) => {
                self.protection = None;
                Ok(())
            }
        }
    }
}
