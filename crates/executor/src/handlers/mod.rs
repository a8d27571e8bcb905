//! Built-in document operations, grouped by the part of the document they
//! touch.
//!
//! | Module | Operations |
//! |--------|------------|
//! | `document` | `create_document`, `get_document_info`, `export_text` |
//! | `paragraph` | `add_paragraph`, `get_paragraphs`, `edit_paragraph`, `delete_paragraph` |
//! | `footnote` | `add_footnote`, `get_footnotes`, `delete_footnote` |
//! | `bookmark` | `add_bookmark`, `get_bookmarks`, `delete_bookmark` |
//! | `table` | `add_table`, `set_cell_colors`, `get_tables` |
//! | `properties` | `set_property`, `get_properties` |
//! | `protection` | `protect_document`, `unprotect_document` |

pub mod bookmark;
pub mod document;
pub mod footnote;
pub mod paragraph;
pub mod properties;
pub mod protection;
pub mod table;

use crate::registry::HandlerRegistry;

/// Register every built-in operation.
pub(crate) fn register_all(registry: &mut HandlerRegistry) {
    registry
        .register(document::CreateDocument)
        .register(document::GetDocumentInfo)
        .register(document::ExportText)
        .register(paragraph::AddParagraph)
        .register(paragraph::GetParagraphs)
        .register(paragraph::EditParagraph)
        .register(paragraph::DeleteParagraph)
        .register(footnote::AddFootnote)
        .register(footnote::GetFootnotes)
        .register(footnote::DeleteFootnote)
        .register(bookmark::AddBookmark)
        .register(bookmark::GetBookmarks)
        .register(bookmark::DeleteBookmark)
        .register(table::AddTable)
        .register(table::SetCellColors)
        .register(table::GetTables)
        .register(properties::SetProperty)
        .register(properties::GetProperties)
        .register(protection::ProtectDocument)
        .register(protection::UnprotectDocument);
}
