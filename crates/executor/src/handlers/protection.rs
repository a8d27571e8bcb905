//! Edit protection.
//!
//! A protected document rejects every mutation except `unprotect_document`.
//! Only a digest of the password is stored.

use crate::context::OperationContext;
use crate::convert::for_param;
use crate::params::ParameterBag;
use crate::registry::Handler;
use crate::{Output, Result};

/// `protect_document`: param `password`.
pub struct ProtectDocument;

impl Handler for ProtectDocument {
    fn name(&self) -> &'static str {
        "protect_document"
    }

    fn execute(&self, ctx: &mut OperationContext<'_>, params: &ParameterBag) -> Result<Output> {
        let password = params.get_non_empty("password")?;
        ctx.document_mut()
            .protect(&password)
            .map_err(for_param("password"))?;
        ctx.mark_modified();
        Ok(Output::message("Document protected"))
    }
}

/// `unprotect_document`: param `password`. A wrong password is a conflict.
pub struct UnprotectDocument;

impl Handler for UnprotectDocument {
    fn name(&self) -> &'static str {
        "unprotect_document"
    }

    fn execute(&self, ctx: &mut OperationContext<'_>, params: &ParameterBag) -> Result<Output> {
        let password: String = params.get_required("password")?;
        ctx.edit(|doc| doc.unprotect(&password))?;
        Ok(Output::message("Document unprotected"))
    }
}
