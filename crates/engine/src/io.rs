//! Document load and save.
//!
//! Documents are stored as JSON. Saves go through a uniquely named temp file
//! in the target's directory and a rename, so neither a crash nor a
//! concurrent writer to the same path can leave a torn document behind.
//! Concurrent writers race on the rename; the last one wins whole.

use std::fs;
use std::io::Write;
use std::path::Path;

use scribe_core::{Document, ScribeError, ScribeResult};
use tempfile::NamedTempFile;
use tracing::debug;

/// Load a document from `path`.
///
/// Every failure (missing file, unreadable file, malformed JSON, or a document
/// that fails [`Document::validate`]) is reported as
/// [`ScribeError::SourceLoad`] naming the path.
pub fn load_document(path: &Path) -> ScribeResult<Document> {
    let source_load = |reason: String| ScribeError::SourceLoad {
        path: path.display().to_string(),
        reason,
    };

    let bytes = fs::read(path).map_err(|e| source_load(e.to_string()))?;
    let doc = serde_json::from_slice(&bytes).map_err(|e| source_load(e.to_string()))?;
    debug!(target: "scribe::io", path = %path.display(), bytes = bytes.len(), "Loaded document");
    Ok(doc)
}

/// Write `doc` to `path` atomically.
pub fn save_document(doc: &Document, path: &Path, pretty: bool) -> ScribeResult<()> {
    let bytes = if pretty {
        serde_json::to_vec_pretty(doc)?
    } else {
        serde_json::to_vec(doc)?
    };

    // Dropping the temp file on any error path removes it.
    let write = || -> std::io::Result<()> {
        let mut tmp = NamedTempFile::new_in(parent_dir(path))?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    };
    write().map_err(|e| ScribeError::io(path.display().to_string(), e))?;

    debug!(target: "scribe::io", path = %path.display(), bytes = bytes.len(), "Saved document");
    Ok(())
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
