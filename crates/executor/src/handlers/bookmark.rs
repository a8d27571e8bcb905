//! Bookmark operations.

use crate::context::OperationContext;
use crate::convert::for_param;
use crate::params::ParameterBag;
use crate::registry::Handler;
use crate::types::BookmarkInfo;
use crate::{Output, Result};

/// `add_bookmark`: params `name`, `paragraphIndex`. Names are unique.
pub struct AddBookmark;

impl Handler for AddBookmark {
    fn name(&self) -> &'static str {
        "add_bookmark"
    }

    fn execute(&self, ctx: &mut OperationContext<'_>, params: &ParameterBag) -> Result<Output> {
        let name = params.get_non_empty("name")?;
        let index: usize = params.get_required("paragraphIndex")?;

        ctx.document_mut()
            .add_bookmark(&name, index)
            .map_err(for_param("name"))?;
        ctx.mark_modified();
        Ok(Output::message(format!(
            "Added bookmark '{}' at paragraph {}",
            name, index
        )))
    }
}

/// `get_bookmarks`: every bookmark, sorted by name.
pub struct GetBookmarks;

impl Handler for GetBookmarks {
    fn name(&self) -> &'static str {
        "get_bookmarks"
    }

    fn execute(&self, ctx: &mut OperationContext<'_>, _params: &ParameterBag) -> Result<Output> {
        let bookmarks = ctx
            .document()
            .bookmarks()
            .iter()
            .map(|(name, index)| BookmarkInfo {
                name: name.clone(),
                paragraph_index: *index,
            })
            .collect();
        Ok(Output::Bookmarks(bookmarks))
    }
}

/// `delete_bookmark`: param `name`.
pub struct DeleteBookmark;

impl Handler for DeleteBookmark {
    fn name(&self) -> &'static str {
        "delete_bookmark"
    }

    fn execute(&self, ctx: &mut OperationContext<'_>, params: &ParameterBag) -> Result<Output> {
        let name: String = params.get_required("name")?;
        let anchor = ctx
            .document_mut()
            .remove_bookmark(&name)
            .map_err(for_param("name"))?;
        ctx.mark_modified();
        Ok(Output::message(format!(
            "Deleted bookmark '{}' (paragraph {})",
            name, anchor
        )))
    }
}
