//! Session store: open documents kept resident between calls.
//!
//! The store maps opaque [`SessionId`] tokens to [`SessionEntry`] values.
//! It is an ordinary value owned by whoever constructs it (normally the
//! executor); there is no process-global instance.
//!
//! ## Concurrency
//!
//! - The token → entry map is a sharded `DashMap`; open, lookup, and close
//!   are safe from any number of threads.
//! - Each entry guards its document with its own mutex (see
//!   [`SessionEntry::lock`]). Callers hold that lock for a whole operation.
//! - Map references are never held while a document lock is taken: lookups
//!   clone the `Arc<SessionEntry>` out first.
//!
//! ## Lifetime
//!
//! A session lives until [`SessionStore::close`], idle eviction, or
//! [`SessionStore::shutdown`]. Closing an unknown or already-closed id is an
//! error, the same `SessionNotFound` that `get` reports.

mod entry;
mod sweeper;
mod token;

pub use entry::{SessionEntry, SessionInfo};
pub use token::SessionId;

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use parking_lot::Mutex;
use scribe_core::{Document, ScribeError, ScribeResult};
use tracing::{debug, info};

use crate::config::ScribeConfig;
use crate::io::{load_document, save_document};
use sweeper::Sweeper;

pub(crate) struct StoreInner {
    entries: DashMap<SessionId, Arc<SessionEntry>>,
    /// Serializes the capacity check with the insert in `open`.
    admission: Mutex<()>,
    idle_timeout: Option<Duration>,
    max_sessions: usize,
    pretty_json: bool,
}

impl StoreInner {
    fn lookup(&self, session_id: &str) -> ScribeResult<Arc<SessionEntry>> {
        self.entries
            .get(session_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| ScribeError::SessionNotFound {
                session_id: session_id.to_string(),
            })
    }

    pub(crate) fn evict_idle(&self, now: Instant) -> Vec<SessionId> {
        let Some(timeout) = self.idle_timeout else {
            return Vec::new();
        };

        let candidates: Vec<Arc<SessionEntry>> = self
            .entries
            .iter()
            .filter(|e| e.value().idle_for(now) > timeout)
            .map(|e| Arc::clone(e.value()))
            .collect();

        let mut evicted = Vec::new();
        for entry in candidates {
            // An in-flight call holds the document lock; leave that session be.
            let Some(_guard) = entry.try_lock() else {
                continue;
            };
            let removed = self
                .entries
                .remove_if(entry.id(), |_, e| e.idle_for(now) > timeout)
                .is_some();
            if removed {
                info!(target: "scribe::session", session_id = %entry.id(), "Evicted idle session");
                evicted.push(entry.id().clone());
            }
        }
        evicted
    }
}

/// Concurrency-safe registry of open sessions.
pub struct SessionStore {
    inner: Arc<StoreInner>,
    sweeper: Mutex<Option<Sweeper>>,
}

impl SessionStore {
    /// Create a store with default configuration and no background sweeper.
    pub fn new() -> Self {
        Self::build(&ScribeConfig::default())
    }

    /// Create a store from `config`, spawning the idle sweeper when both an
    /// idle timeout and a sweep interval are configured.
    pub fn with_config(config: &ScribeConfig) -> ScribeResult<Self> {
        config.validate()?;
        let store = Self::build(config);
        if let (Some(_), Some(interval)) = (config.idle_timeout(), config.sweep_interval()) {
            let sweeper = Sweeper::spawn(Arc::downgrade(&store.inner), interval)?;
            *store.sweeper.lock() = Some(sweeper);
        }
        Ok(store)
    }

    fn build(config: &ScribeConfig) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                entries: DashMap::new(),
                admission: Mutex::new(()),
                idle_timeout: config.idle_timeout(),
                max_sessions: config.max_sessions.max(1),
                pretty_json: config.pretty_json,
            }),
            sweeper: Mutex::new(None),
        }
    }

    /// Whether documents are written as indented JSON.
    pub fn pretty_json(&self) -> bool {
        self.inner.pretty_json
    }

    /// Load the document at `path` and keep it resident under a new token.
    ///
    /// # Errors
    ///
    /// - `SourceLoad` if the document cannot be loaded
    /// - `SessionLimit` if the store is full
    pub fn open(&self, path: &Path) -> ScribeResult<SessionId> {
        let document = load_document(path)?;
        self.insert(path, document)
    }

    fn insert(&self, path: &Path, document: Document) -> ScribeResult<SessionId> {
        let _admission = self.inner.admission.lock();
        if self.inner.entries.len() >= self.inner.max_sessions {
            return Err(ScribeError::SessionLimit {
                max: self.inner.max_sessions,
            });
        }

        let mut document = Some(document);
        loop {
            let id = SessionId::generate();
            if let dashmap::mapref::entry::Entry::Vacant(slot) = self.inner.entries.entry(id.clone()) {
                let doc = document.take().unwrap_or_default();
                slot.insert(Arc::new(SessionEntry::new(id.clone(), path.to_path_buf(), doc)));
                info!(target: "scribe::session", session_id = %id, path = %path.display(), "Opened session");
                return Ok(id);
            }
        }
    }

    /// Resolve a token to its entry.
    ///
    /// # Errors
    ///
    /// `SessionNotFound` if the token is unknown, closed, or evicted.
    pub fn get(&self, session_id: &str) -> ScribeResult<Arc<SessionEntry>> {
        let entry = self.inner.lookup(session_id)?;
        entry.touch();
        debug!(target: "scribe::session", session_id = %session_id, "Resolved session");
        Ok(entry)
    }

    /// Snapshot of the resident document, taken under the session lock.
    pub fn document(&self, session_id: &str) -> ScribeResult<Document> {
        let entry = self.get(session_id)?;
        let doc = entry.lock().clone();
        Ok(doc)
    }

    /// Remove a session. Its document is dropped without being written.
    ///
    /// A call already holding the session's lock finishes against the
    /// detached document; every later lookup fails.
    ///
    /// # Errors
    ///
    /// `SessionNotFound` if the token is unknown or already closed.
    pub fn close(&self, session_id: &str) -> ScribeResult<()> {
        match self.inner.entries.remove(session_id) {
            Some(_) => {
                info!(target: "scribe::session", session_id = %session_id, "Closed session");
                Ok(())
            }
            None => Err(ScribeError::SessionNotFound {
                session_id: session_id.to_string(),
            }),
        }
    }

    /// Write a session's document to `path`, or back to the path it was
    /// opened from. The session stays open.
    pub fn save(&self, session_id: &str, path: Option<&Path>) -> ScribeResult<std::path::PathBuf> {
        let entry = self.get(session_id)?;
        let target = path.unwrap_or_else(|| entry.source_path()).to_path_buf();
        let doc = entry.lock();
        save_document(&doc, &target, self.inner.pretty_json)?;
        info!(target: "scribe::session", session_id = %session_id, path = %target.display(), "Saved session");
        Ok(target)
    }

    /// Metadata for every open session, oldest first.
    pub fn list(&self) -> Vec<SessionInfo> {
        let mut infos: Vec<SessionInfo> = self
            .inner
            .entries
            .iter()
            .map(|e| e.value().info())
            .collect();
        infos.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        infos
    }

    /// Number of open sessions.
    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    /// Whether no sessions are open.
    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    /// Close every session idle longer than the configured timeout.
    /// Sessions in use by an in-flight call are skipped.
    pub fn evict_idle(&self) -> Vec<SessionId> {
        self.inner.evict_idle(Instant::now())
    }

    /// [`evict_idle`](Self::evict_idle) measured against an explicit clock
    /// reading.
    pub fn evict_idle_as_of(&self, now: Instant) -> Vec<SessionId> {
        self.inner.evict_idle(now)
    }

    /// Stop the sweeper and drop every session.
    pub fn shutdown(&self) {
        if let Some(mut sweeper) = self.sweeper.lock().take() {
            sweeper.stop();
        }
        let count = self.inner.entries.len();
        self.inner.entries.clear();
        info!(target: "scribe::session", count, "Session store shut down");
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("sessions", &self.inner.entries.len())
            .field("max_sessions", &self.inner.max_sessions)
            .field("idle_timeout", &self.inner.idle_timeout)
            .finish()
    }
}
