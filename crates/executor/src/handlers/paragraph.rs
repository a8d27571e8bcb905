//! Paragraph operations.

use scribe_core::ParagraphStyle;

use crate::context::OperationContext;
use crate::convert::for_param;
use crate::params::ParameterBag;
use crate::registry::Handler;
use crate::types::ParagraphInfo;
use crate::{Error, Output, Result};

fn style_param(params: &ParameterBag) -> Result<Option<ParagraphStyle>> {
    params
        .get::<String>("style")?
        .map(|s| s.parse::<ParagraphStyle>().map_err(for_param("style")))
        .transpose()
}

/// `add_paragraph`: params `text`, `index` (optional, default append),
/// `style` (optional, default normal).
pub struct AddParagraph;

impl Handler for AddParagraph {
    fn name(&self) -> &'static str {
        "add_paragraph"
    }

    fn execute(&self, ctx: &mut OperationContext<'_>, params: &ParameterBag) -> Result<Output> {
        let text: String = params.get_required("text")?;
        let index: Option<usize> = params.get("index")?;
        let style = style_param(params)?.unwrap_or_default();

        let at = ctx.edit(|doc| doc.insert_paragraph(index, text, style))?;
        Ok(Output::message(format!("Added paragraph at index {}", at)))
    }
}

/// `get_paragraphs`: params `start` (default 0), `count` (default all).
pub struct GetParagraphs;

impl Handler for GetParagraphs {
    fn name(&self) -> &'static str {
        "get_paragraphs"
    }

    fn execute(&self, ctx: &mut OperationContext<'_>, params: &ParameterBag) -> Result<Output> {
        let start: usize = params.get_optional("start", 0)?;
        let count: Option<usize> = params.get("count")?;

        let paragraphs = ctx.document().paragraphs();
        if start > paragraphs.len() {
            return Err(Error::invalid(
                "start",
                format!("out of range: {} (length {})", start, paragraphs.len()),
            ));
        }
        let out = paragraphs
            .iter()
            .enumerate()
            .skip(start)
            .take(count.unwrap_or(usize::MAX))
            .map(|(i, p)| ParagraphInfo::new(i, p))
            .collect();
        Ok(Output::Paragraphs(out))
    }
}

/// `edit_paragraph`: params `paragraphIndex`, and at least one of `text`,
/// `style`.
pub struct EditParagraph;

impl Handler for EditParagraph {
    fn name(&self) -> &'static str {
        "edit_paragraph"
    }

    fn execute(&self, ctx: &mut OperationContext<'_>, params: &ParameterBag) -> Result<Output> {
        let index: usize = params.get_required("paragraphIndex")?;
        let text: Option<String> = params.get("text")?;
        let style = style_param(params)?;
        if text.is_none() && style.is_none() {
            return Err(Error::missing("text or style"));
        }

        ctx.edit(|doc| doc.edit_paragraph(index, text, style))?;
        Ok(Output::message(format!("Updated paragraph {}", index)))
    }
}

/// `delete_paragraph`: param `paragraphIndex`. Footnotes and bookmarks
/// anchored to the paragraph go with it.
pub struct DeleteParagraph;

impl Handler for DeleteParagraph {
    fn name(&self) -> &'static str {
        "delete_paragraph"
    }

    fn execute(&self, ctx: &mut OperationContext<'_>, params: &ParameterBag) -> Result<Output> {
        let index: usize = params.get_required("paragraphIndex")?;
        ctx.edit(|doc| doc.remove_paragraph(index))?;
        Ok(Output::message(format!("Deleted paragraph {}", index)))
    }
}
