//! Footnote operations.

use crate::context::OperationContext;
use crate::params::ParameterBag;
use crate::registry::Handler;
use crate::{Output, Result};

/// `add_footnote`: params `paragraphIndex`, `text`.
pub struct AddFootnote;

impl Handler for AddFootnote {
    fn name(&self) -> &'static str {
        "add_footnote"
    }

    fn execute(&self, ctx: &mut OperationContext<'_>, params: &ParameterBag) -> Result<Output> {
        let index: usize = params.get_required("paragraphIndex")?;
        let text = params.get_non_empty("text")?;

        let id = ctx.edit(|doc| doc.add_footnote(index, text))?;
        Ok(Output::message(format!(
            "Added footnote {} to paragraph {}",
            id, index
        )))
    }
}

/// `get_footnotes`: every footnote, ordered by paragraph and then by id.
pub struct GetFootnotes;

impl Handler for GetFootnotes {
    fn name(&self) -> &'static str {
        "get_footnotes"
    }

    fn execute(&self, ctx: &mut OperationContext<'_>, _params: &ParameterBag) -> Result<Output> {
        Ok(Output::Footnotes(ctx.document().footnotes().to_vec()))
    }
}

/// `delete_footnote`: param `footnoteId`.
pub struct DeleteFootnote;

impl Handler for DeleteFootnote {
    fn name(&self) -> &'static str {
        "delete_footnote"
    }

    fn execute(&self, ctx: &mut OperationContext<'_>, params: &ParameterBag) -> Result<Output> {
        let id: u32 = params.get_required("footnoteId")?;
        ctx.edit(|doc| doc.remove_footnote(id))?;
        Ok(Output::message(format!("Deleted footnote {}", id)))
    }
}
