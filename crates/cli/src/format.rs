//! Output formatting for human and JSON modes.
//!
//! JSON mode prints exactly one compact JSON value per input line so the
//! output can be consumed line by line.

use scribe_executor::{Envelope, Error, Output, SessionId, SessionInfo};

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

fn to_json_line<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

/// Format a successful envelope.
pub fn format_envelope(envelope: &Envelope, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_json_line(envelope),
        OutputMode::Human => format_human(&envelope.payload),
    }
}

/// Format an error.
pub fn format_error(err: &Error, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_json_line(&serde_json::json!({
            "error": {
                "kind": err.kind(),
                "message": err.to_string(),
                "detail": err,
            }
        })),
        OutputMode::Human => format!("(error) {}", err),
    }
}

/// Format a message that is not tied to an executor error (bad input line).
pub fn format_usage_error(message: &str, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_json_line(&serde_json::json!({ "error": { "message": message } })),
        OutputMode::Human => format!("(error) {}", message),
    }
}

/// Format a newly opened session id.
pub fn format_opened(id: &SessionId, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_json_line(&serde_json::json!({ "sessionId": id })),
        OutputMode::Human => id.to_string(),
    }
}

/// Format a plain confirmation.
pub fn format_ok(message: &str, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_json_line(&serde_json::json!({ "ok": message })),
        OutputMode::Human => message.to_string(),
    }
}

/// Format the session list.
pub fn format_sessions(sessions: &[SessionInfo], mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_json_line(&sessions),
        OutputMode::Human if sessions.is_empty() => "(no sessions)".to_string(),
        OutputMode::Human => sessions
            .iter()
            .map(|s| {
                format!(
                    "{}  {}  (opened {}, last used {})",
                    s.id,
                    s.source_path.display(),
                    s.created_at.format("%H:%M:%S"),
                    s.last_accessed_at.format("%H:%M:%S"),
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Format the operation list.
pub fn format_ops(ops: &[&str], mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_json_line(&ops),
        OutputMode::Human => ops.join("\n"),
    }
}

// =========================================================================
// Human mode
// =========================================================================

fn empty_or(lines: Vec<String>) -> String {
    if lines.is_empty() {
        "(empty list)".to_string()
    } else {
        lines.join("\n")
    }
}

fn format_human(output: &Output) -> String {
    match output {
        Output::Message(m) => m.clone(),
        Output::Text(t) => t.clone(),
        Output::DocumentInfo(info) => {
            let mut lines = Vec::new();
            if let Some(title) = &info.title {
                lines.push(format!("title:      {}", title));
            }
            lines.push(format!("paragraphs: {}", info.paragraphs));
            lines.push(format!("footnotes:  {}", info.footnotes));
            lines.push(format!("bookmarks:  {}", info.bookmarks));
            lines.push(format!("tables:     {}", info.tables));
            lines.push(format!("properties: {}", info.properties));
            lines.push(format!("protected:  {}", info.protected));
            lines.join("\n")
        }
        Output::Paragraphs(ps) => empty_or(
            ps.iter()
                .map(|p| format!("{}) [{}] {}", p.index, p.style, p.text))
                .collect(),
        ),
        Output::Footnotes(notes) => empty_or(
            notes
                .iter()
                .map(|n| format!("[{}] paragraph {}: {}", n.id, n.paragraph_index, n.text))
                .collect(),
        ),
        Output::Bookmarks(marks) => empty_or(
            marks
                .iter()
                .map(|b| format!("{} -> paragraph {}", b.name, b.paragraph_index))
                .collect(),
        ),
        Output::Tables(tables) => empty_or(
            tables
                .iter()
                .map(|t| {
                    let mut lines = vec![format!("table {}: {}x{}", t.index, t.rows, t.columns)];
                    for row in &t.cells {
                        let cells: Vec<String> = row
                            .iter()
                            .map(|c| match &c.color {
                                Some(color) => format!("{} ({})", c.text, color.as_hex()),
                                None => c.text.clone(),
                            })
                            .collect();
                        lines.push(format!("  | {} |", cells.join(" | ")));
                    }
                    lines.join("\n")
                })
                .collect(),
        ),
        Output::Properties(props) => empty_or(
            props
                .iter()
                .map(|(k, v)| format!("{} = {}", k, v))
                .collect(),
        ),
    }
}
