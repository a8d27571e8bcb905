//! Document property operations.

use crate::context::OperationContext;
use crate::params::ParameterBag;
use crate::registry::Handler;
use crate::{Output, Result};

/// `set_property`: params `name`, `value`. Overwrites silently.
pub struct SetProperty;

impl Handler for SetProperty {
    fn name(&self) -> &'static str {
        "set_property"
    }

    fn execute(&self, ctx: &mut OperationContext<'_>, params: &ParameterBag) -> Result<Output> {
        let name = params.get_non_empty("name")?;
        let value: String = params.get_required("value")?;

        let previous = ctx.edit(|doc| doc.set_property(&name, value))?;
        let verb = if previous.is_some() { "Updated" } else { "Set" };
        Ok(Output::message(format!("{} property '{}'", verb, name)))
    }
}

/// `get_properties`: all properties, sorted by name.
pub struct GetProperties;

impl Handler for GetProperties {
    fn name(&self) -> &'static str {
        "get_properties"
    }

    fn execute(&self, ctx: &mut OperationContext<'_>, _params: &ParameterBag) -> Result<Output> {
        Ok(Output::Properties(ctx.document().properties().clone()))
    }
}
