//! Validation Tests
//!
//! A request that fails validation leaves the target document exactly as it
//! was, whether it lives in a session or on disk.

use crate::common::*;
use scribe::{Error, ErrorKind, Executor, Request, SessionId};
use serde_json::json;

/// Requests that must all fail against the fixture document.
fn invalid_requests() -> Vec<(&'static str, serde_json::Value)> {
    vec![
        ("add_paragraph", json!({})),
        ("add_paragraph", json!({"text": 5})),
        ("add_paragraph", json!({"text": "x", "index": 99})),
        ("add_paragraph", json!({"text": "x", "style": "bogus"})),
        ("add_paragraph", json!({"text": "x", "index": "first"})),
        ("edit_paragraph", json!({"paragraphIndex": 9, "text": "y"})),
        ("edit_paragraph", json!({"paragraphIndex": "zero", "text": "y"})),
        ("edit_paragraph", json!({"paragraphIndex": 0})),
        ("edit_paragraph", json!({"paragraphIndex": 0, "text": "y", "style": "nope"})),
        ("delete_paragraph", json!({"paragraphIndex": -1})),
        ("add_footnote", json!({"paragraphIndex": 5, "text": "n"})),
        ("add_footnote", json!({"paragraphIndex": 0, "text": ""})),
        ("delete_footnote", json!({"footnoteId": 99})),
        ("add_bookmark", json!({"name": "intro", "paragraphIndex": 1})),
        ("add_bookmark", json!({"name": "", "paragraphIndex": 0})),
        ("add_bookmark", json!({"name": "other", "paragraphIndex": 7})),
        ("delete_bookmark", json!({"name": "missing"})),
        ("add_table", json!({"rows": 0, "columns": 1})),
        ("add_table", json!({"rows": 1, "columns": 1000})),
        ("set_cell_colors", json!({"tableIndex": 3, "cells": [{"row": 0, "column": 0, "color": "red"}]})),
        ("set_cell_colors", json!({"tableIndex": 0, "cells": []})),
        ("set_cell_colors", json!({"tableIndex": 0, "cells": [
            {"row": 0, "column": 0, "color": "red"},
            {"row": 5, "column": 0, "color": "red"}
        ]})),
        ("set_cell_colors", json!({"tableIndex": 0, "cells": [
            {"row": 0, "column": 0, "color": "red"},
            {"row": 1, "column": 1, "color": "ultraviolet"}
        ]})),
        ("set_cell_colors", json!({"tableIndex": 0, "cells": "red"})),
        ("set_property", json!({"name": "k"})),
        ("set_property", json!({"name": "k", "value": 3})),
        ("protect_document", json!({"password": ""})),
        ("unprotect_document", json!({"password": "x"})),
        ("export_text", json!({"targetPath": 5})),
    ]
}

/// Session over a document with two paragraphs, a 2x2 table, a bookmark
/// and a footnote.
fn fixture(executor: &Executor, dir: &std::path::Path) -> (SessionId, std::path::PathBuf) {
    let path = write_doc(dir, "doc.json", &["a", "b"]);
    let id = executor.open_session(&path).unwrap();
    for request in [
        Request::new("add_table")
            .param("rows", 2i64)
            .param("columns", 2i64),
        Request::new("add_bookmark")
            .param("name", "intro")
            .param("paragraphIndex", 0i64),
        Request::new("add_footnote")
            .param("paragraphIndex", 1i64)
            .param("text", "note"),
    ] {
        executor.execute(request.session(&id)).unwrap();
    }
    executor.save_session(id.as_str(), None).unwrap();
    (id, path)
}

#[test]
fn failed_session_calls_leave_document_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let executor = create_executor();
    let (id, _) = fixture(&executor, dir.path());
    let before = executor.get_document(id.as_str()).unwrap();

    for (operation, params) in invalid_requests() {
        let request = flat_request(operation, ("sessionId", id.as_str()), &params);
        let result = executor.execute_json(&request);
        assert!(result.is_err(), "{} {} unexpectedly succeeded", operation, params);
        assert_eq!(
            executor.get_document(id.as_str()).unwrap(),
            before,
            "{} {} changed the document",
            operation,
            params
        );
    }
}

#[test]
fn failed_ephemeral_calls_leave_file_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let executor = create_executor();
    let (id, path) = fixture(&executor, dir.path());
    executor.close_session(id.as_str()).unwrap();
    let before = std::fs::read(&path).unwrap();

    for (operation, params) in invalid_requests() {
        let request = flat_request(operation, ("path", path.to_str().unwrap()), &params);
        assert!(executor.execute_json(&request).is_err(), "{} {}", operation, params);
        assert_eq!(std::fs::read(&path).unwrap(), before, "{} {}", operation, params);
    }
}

#[test]
fn error_kinds_match_failure() {
    let dir = tempfile::tempdir().unwrap();
    let executor = create_executor();
    let (id, _) = fixture(&executor, dir.path());
    let run = |operation: &str, params: serde_json::Value| {
        executor
            .execute_json(&flat_request(operation, ("sessionId", id.as_str()), &params))
            .unwrap_err()
    };

    assert_eq!(
        run("add_paragraph", json!({})),
        Error::MissingParameter {
            name: "text".into()
        }
    );
    assert!(matches!(
        run("add_paragraph", json!({"text": 5})),
        Error::InvalidParameterType { ref name, .. } if name == "text"
    ));
    assert_eq!(
        run("edit_paragraph", json!({"paragraphIndex": 9, "text": "y"})).to_string(),
        "paragraphIndex out of range: 9 (length 2)"
    );
    assert_eq!(
        run("delete_bookmark", json!({"name": "missing"})).kind(),
        ErrorKind::NotFound
    );
    assert_eq!(
        run("add_bookmark", json!({"name": "intro", "paragraphIndex": 1})).kind(),
        ErrorKind::StateConflict
    );
}
