//! A single open session.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, MutexGuard};
use scribe_core::Document;
use serde::{Deserialize, Serialize};

use super::SessionId;

/// A resident document plus its bookkeeping.
///
/// The document sits behind the entry's own mutex. Callers hold the guard
/// for the full duration of an operation, so two calls against one session
/// never interleave. No map lock is held while waiting on this mutex.
pub struct SessionEntry {
    id: SessionId,
    source_path: PathBuf,
    document: Mutex<Document>,
    created_at: DateTime<Utc>,
    last_access: Mutex<Access>,
}

#[derive(Clone, Copy)]
struct Access {
    at: Instant,
    wall: DateTime<Utc>,
}

impl Access {
    fn now() -> Self {
        Self {
            at: Instant::now(),
            wall: Utc::now(),
        }
    }
}

/// Snapshot of a session's metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    /// Session token
    pub id: SessionId,
    /// Path the document was opened from
    pub source_path: PathBuf,
    /// When the session was opened
    pub created_at: DateTime<Utc>,
    /// When the session was last resolved by a call
    pub last_accessed_at: DateTime<Utc>,
}

impl SessionEntry {
    pub(crate) fn new(id: SessionId, source_path: PathBuf, document: Document) -> Self {
        let access = Access::now();
        Self {
            id,
            source_path,
            document: Mutex::new(document),
            created_at: access.wall,
            last_access: Mutex::new(access),
        }
    }

    /// Session token.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Path the document was loaded from.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Lock the document for exclusive use. Blocks while another call holds
    /// it.
    pub fn lock(&self) -> MutexGuard<'_, Document> {
        let guard = self.document.lock();
        self.touch();
        guard
    }

    pub(crate) fn try_lock(&self) -> Option<MutexGuard<'_, Document>> {
        self.document.try_lock()
    }

    pub(crate) fn touch(&self) {
        *self.last_access.lock() = Access::now();
    }

    /// Time since the last access, measured against `now`.
    pub fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_access.lock().at)
    }

    /// Metadata snapshot.
    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            id: self.id.clone(),
            source_path: self.source_path.clone(),
            created_at: self.created_at,
            last_accessed_at: self.last_access.lock().wall,
        }
    }
}

impl std::fmt::Debug for SessionEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionEntry")
            .field("id", &self.id)
            .field("source_path", &self.source_path)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}
