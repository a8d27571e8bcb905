//! The Executor - single entry point for document requests.
//!
//! The Executor routes a [`Request`] to its handler, resolves the target
//! document, and finalizes the result. It owns no document state itself:
//! resident documents live in the [`SessionStore`], ephemeral ones live for a
//! single call.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use scribe_core::Document;
use scribe_engine::{ScribeConfig, SessionId, SessionInfo, SessionStore};
use tracing::debug;

use crate::context::{OperationContext, Source};
use crate::envelope::{finalize, Envelope};
use crate::registry::{Handler, HandlerRegistry};
use crate::resolver::{ResolvedSource, SourceResolver};
use crate::session::Session;
use crate::{Request, Result};

/// The request executor.
///
/// # Thread Safety
///
/// Executor is `Send + Sync` and cheap to clone; clones share the session
/// store and registry. Calls against the same session are serialized by the
/// session's own lock; everything else runs in parallel.
///
/// # Example
///
/// ```ignore
/// use scribe::{Executor, Request};
///
/// let executor = Executor::default();
/// let id = executor.open_session("report.json")?;
///
/// executor.execute(
///     Request::new("add_footnote")
///         .session(&id)
///         .param("paragraphIndex", 0)
///         .param("text", "See appendix"),
/// )?;
/// executor.save_session(&id, None)?;
/// executor.close_session(&id)?;
/// ```
#[derive(Clone)]
pub struct Executor {
    sessions: Arc<SessionStore>,
    registry: Arc<HandlerRegistry>,
}

impl Executor {
    /// Executor over `sessions` with every built-in operation.
    pub fn new(sessions: Arc<SessionStore>) -> Self {
        Self::with_registry(sessions, HandlerRegistry::with_builtin_handlers())
    }

    /// Executor over `sessions` with a custom registry.
    pub fn with_registry(sessions: Arc<SessionStore>, registry: HandlerRegistry) -> Self {
        Self {
            sessions,
            registry: Arc::new(registry),
        }
    }

    /// Executor with a session store built from `config` (including its
    /// idle sweeper, if enabled).
    pub fn from_config(config: &ScribeConfig) -> Result<Self> {
        let sessions = SessionStore::with_config(config)?;
        Ok(Self::new(Arc::new(sessions)))
    }

    /// Execute a single request.
    ///
    /// The handler is looked up before anything else, so an unknown
    /// operation never touches a session or the filesystem. For session
    /// targets the session lock is held from resolution to the end of the
    /// handler.
    pub fn execute(&self, request: Request) -> Result<Envelope> {
        let Request {
            operation,
            path,
            session_id,
            output_path,
            params,
        } = request;

        let handler = self.registry.lookup(&operation)?;
        debug!(
            target: "scribe::dispatch",
            operation = handler.name(),
            session_id = session_id.as_deref(),
            path = path.as_deref(),
            "Dispatching"
        );

        let resolved = SourceResolver::new(&self.sessions).resolve(
            path.as_deref(),
            session_id.as_deref(),
            handler.creates_document(),
        )?;

        let result = match resolved {
            ResolvedSource::Session(entry) => {
                if output_path.is_some() {
                    debug!(target: "scribe::dispatch", session_id = %entry.id(), "Ignoring outputPath for session call");
                }
                let mut document = entry.lock();
                let ctx = OperationContext::new(&mut *document, Source::Session(entry.id().clone()));
                self.run(handler, ctx, &params)
            }
            ResolvedSource::Ephemeral { path, mut document } => {
                let source = Source::Ephemeral {
                    path,
                    output_path: output_path.map(PathBuf::from),
                };
                let ctx = OperationContext::new(&mut document, source);
                self.run(handler, ctx, &params)
            }
        };

        if let Err(e) = &result {
            debug!(target: "scribe::dispatch", operation = handler.name(), error = %e, "Request failed");
        }
        result
    }

    fn run(
        &self,
        handler: &dyn Handler,
        mut ctx: OperationContext<'_>,
        params: &crate::ParameterBag,
    ) -> Result<Envelope> {
        let payload = handler.execute(&mut ctx, params)?;
        finalize(ctx, payload, self.sessions.pretty_json())
    }

    /// Parse a flat JSON request and execute it.
    pub fn execute_json(&self, request: &serde_json::Value) -> Result<Envelope> {
        self.execute(Request::from_json(request.clone())?)
    }

    // =========================================================================
    // Session lifecycle
    // =========================================================================

    /// Load `path` into a new session.
    pub fn open_session(&self, path: impl AsRef<Path>) -> Result<SessionId> {
        Ok(self.sessions.open(path.as_ref())?)
    }

    /// Discard a session without saving.
    pub fn close_session(&self, session_id: &str) -> Result<()> {
        Ok(self.sessions.close(session_id)?)
    }

    /// Write a session's document to `path`, or back to its source path.
    /// The session stays open. Returns the path written.
    pub fn save_session(&self, session_id: &str, path: Option<&Path>) -> Result<PathBuf> {
        Ok(self.sessions.save(session_id, path)?)
    }

    /// Snapshot of a session's document.
    pub fn get_document(&self, session_id: &str) -> Result<Document> {
        Ok(self.sessions.document(session_id)?)
    }

    /// Metadata for every open session, oldest first.
    pub fn list_sessions(&self) -> Vec<SessionInfo> {
        self.sessions.list()
    }

    /// Open `path` and wrap the new session in a [`Session`] handle.
    pub fn session(&self, path: impl AsRef<Path>) -> Result<Session> {
        let id = self.open_session(path)?;
        Ok(Session::new(self.clone(), id))
    }

    /// The underlying session store.
    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    /// The operation registry.
    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new(Arc::new(SessionStore::new()))
    }
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("sessions", &self.sessions.len())
            .field("operations", &self.registry.len())
            .finish()
    }
}
