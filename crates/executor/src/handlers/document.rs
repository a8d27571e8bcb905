//! Whole-document operations.

use scribe_core::Document;

use crate::context::OperationContext;
use crate::params::ParameterBag;
use crate::registry::Handler;
use crate::types::DocumentInfo;
use crate::{Error, Output, Result};

/// `create_document`: start a fresh document at `path`.
///
/// Params: `title` (optional), `overwrite` (default false). Refuses to
/// replace an existing file unless `overwrite` is set, and refuses to run
/// against a session.
pub struct CreateDocument;

impl Handler for CreateDocument {
    fn name(&self) -> &'static str {
        "create_document"
    }

    fn creates_document(&self) -> bool {
        true
    }

    fn execute(&self, ctx: &mut OperationContext<'_>, params: &ParameterBag) -> Result<Output> {
        let title: Option<String> = params.get("title")?;
        let overwrite = params.get_optional("overwrite", false)?;

        if ctx.is_session() {
            return Err(Error::invalid(
                "sessionId",
                "cannot be used with create_document; pass a path",
            ));
        }
        let target = match ctx.write_target() {
            Some(target) => target.to_path_buf(),
            None => return Err(Error::missing("path")),
        };
        if target.exists() && !overwrite {
            return Err(Error::Conflict {
                reason: format!(
                    "'{}' already exists; pass overwrite=true to replace it",
                    target.display()
                ),
            });
        }

        let document = match title {
            Some(title) => Document::with_title(title),
            None => Document::new(),
        };
        ctx.replace_document(document);
        Ok(Output::message(format!("Created document at {}", target.display())))
    }
}

/// `get_document_info`: summary counts.
pub struct GetDocumentInfo;

impl Handler for GetDocumentInfo {
    fn name(&self) -> &'static str {
        "get_document_info"
    }

    fn execute(&self, ctx: &mut OperationContext<'_>, _params: &ParameterBag) -> Result<Output> {
        Ok(Output::DocumentInfo(DocumentInfo::from(ctx.document())))
    }
}

/// `export_text`: plain-text rendering, optionally also written to
/// `targetPath`. Never modifies the document.
pub struct ExportText;

impl Handler for ExportText {
    fn name(&self) -> &'static str {
        "export_text"
    }

    fn execute(&self, ctx: &mut OperationContext<'_>, params: &ParameterBag) -> Result<Output> {
        let target: Option<String> = params.get("targetPath")?;
        if matches!(target.as_deref(), Some("")) {
            return Err(Error::invalid("targetPath", "must not be empty"));
        }

        let text = ctx.document().plain_text();
        if let Some(target) = target {
            std::fs::write(&target, &text).map_err(|e| Error::Io {
                reason: format!("failed to write '{}': {}", target, e),
            })?;
        }
        Ok(Output::Text(text))
    }
}
