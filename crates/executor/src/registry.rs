//! Operation registry.
//!
//! Maps case-insensitive operation names to [`Handler`]s. The registry is
//! built once, before the first request, and read-only afterwards, so it can
//! be shared across threads without locking.

use std::collections::HashMap;

use crate::context::OperationContext;
use crate::params::ParameterBag;
use crate::{handlers, Error, Output, Result};

/// A named operation.
pub trait Handler: Send + Sync {
    /// Operation name. Matched case-insensitively.
    fn name(&self) -> &'static str;

    /// Whether the operation produces a new document instead of loading one.
    fn creates_document(&self) -> bool {
        false
    }

    /// Run the operation. Must validate all parameters before changing the
    /// document, and mark the context modified when it does change it.
    fn execute(&self, ctx: &mut OperationContext<'_>, params: &ParameterBag) -> Result<Output>;
}

/// Canonical registry key.
fn canonical(name: &str) -> String {
    name.to_lowercase()
}

/// Name → handler table.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Box<dyn Handler>>,
}

impl HandlerRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in document operation.
    pub fn with_builtin_handlers() -> Self {
        let mut registry = Self::new();
        handlers::register_all(&mut registry);
        registry
    }

    /// Register a handler.
    ///
    /// # Panics
    ///
    /// Panics if the name is already registered. Registration happens at
    /// startup, so a duplicate is a programming error; use
    /// [`try_register`](Self::try_register) to handle it instead.
    pub fn register<H: Handler + 'static>(&mut self, handler: H) -> &mut Self {
        let name = handler.name();
        if let Err(e) = self.try_register(handler) {
            panic!("cannot register '{}': {}", name, e);
        }
        self
    }

    /// Register a handler, failing with `DuplicateOperation` on a name clash.
    pub fn try_register<H: Handler + 'static>(&mut self, handler: H) -> Result<()> {
        let key = canonical(handler.name());
        if self.handlers.contains_key(&key) {
            return Err(Error::DuplicateOperation { operation: key });
        }
        self.handlers.insert(key, Box::new(handler));
        Ok(())
    }

    /// Find the handler for `operation`, ignoring case.
    ///
    /// The error carries the caller's original spelling.
    pub fn lookup(&self, operation: &str) -> Result<&dyn Handler> {
        self.handlers
            .get(&canonical(operation))
            .map(|h| h.as_ref())
            .ok_or_else(|| Error::UnknownOperation {
                operation: operation.to_string(),
            })
    }

    /// Look up and run `operation` in one step.
    pub fn dispatch(
        &self,
        operation: &str,
        ctx: &mut OperationContext<'_>,
        params: &ParameterBag,
    ) -> Result<Output> {
        self.lookup(operation)?.execute(ctx, params)
    }

    /// Whether `operation` is registered.
    pub fn contains(&self, operation: &str) -> bool {
        self.handlers.contains_key(&canonical(operation))
    }

    /// Registered canonical names, sorted.
    pub fn operations(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered operations.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no operation is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("operations", &self.operations())
            .finish()
    }
}
