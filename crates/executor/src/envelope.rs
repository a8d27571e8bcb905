//! Result envelopes and call finalization.

use scribe_core::Document;
use scribe_engine::{save_document, SessionId};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::context::{OperationContext, Source};
use crate::{Output, Result};

/// A handler's payload plus session metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// Handler output
    pub payload: Output,
    /// Session token, present exactly when the call ran against a session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<SessionId>,
    /// Whether the call ran against a session
    pub is_session: bool,
}

impl Envelope {
    /// Envelope for a session-resident call.
    pub fn session(payload: Output, session_id: SessionId) -> Self {
        Envelope {
            payload,
            session_id: Some(session_id),
            is_session: true,
        }
    }

    /// Envelope for an ephemeral call.
    pub fn ephemeral(payload: Output) -> Self {
        Envelope {
            payload,
            session_id: None,
            is_session: false,
        }
    }
}

/// Persist if needed and wrap the payload.
///
/// Session documents are never written here; they stay resident until an
/// explicit save. A modified ephemeral document is written to the output path
/// (or its source path) before the envelope is returned. A write failure
/// fails the whole call.
pub(crate) fn finalize(ctx: OperationContext<'_>, payload: Output, pretty: bool) -> Result<Envelope> {
    match ctx.source() {
        Source::Session(id) => Ok(Envelope::session(payload, id.clone())),
        Source::Ephemeral { .. } => {
            if ctx.is_modified() {
                if let Some(target) = ctx.write_target() {
                    persist(ctx.document(), target, pretty)?;
                }
            }
            Ok(Envelope::ephemeral(payload))
        }
    }
}

fn persist(document: &Document, target: &std::path::Path, pretty: bool) -> Result<()> {
    if let Err(e) = save_document(document, target, pretty) {
        warn!(target: "scribe::dispatch", path = %target.display(), error = %e, "Failed to persist ephemeral document");
        return Err(e.into());
    }
    debug!(target: "scribe::dispatch", path = %target.display(), "Persisted ephemeral document");
    Ok(())
}
