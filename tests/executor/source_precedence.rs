//! Source Precedence Tests
//!
//! A non-empty session id always wins over a path; an unknown session id
//! never falls back to the path.

use crate::common::*;
use scribe::{Error, Request};

#[test]
fn session_wins_when_both_given() {
    let dir = tempfile::tempdir().unwrap();
    let session_file = write_doc(dir.path(), "session.json", &["SessionX"]);
    let path_file = write_doc(dir.path(), "path.json", &["PathX"]);
    let executor = create_executor();
    let id = executor.open_session(&session_file).unwrap();

    let envelope = executor
        .execute(
            Request::new("get_paragraphs")
                .session(&id)
                .path(&path_file),
        )
        .unwrap();
    assert!(envelope.is_session);
    assert_eq!(extract_paragraph_texts(&envelope.payload), vec!["SessionX"]);
}

#[test]
fn mutation_with_both_touches_only_session() {
    let dir = tempfile::tempdir().unwrap();
    let session_file = write_doc(dir.path(), "session.json", &["SessionX"]);
    let path_file = write_doc(dir.path(), "path.json", &["PathX"]);
    let path_before = std::fs::read(&path_file).unwrap();
    let executor = create_executor();
    let id = executor.open_session(&session_file).unwrap();

    executor
        .execute(
            Request::new("add_paragraph")
                .session(&id)
                .path(&path_file)
                .param("text", "new"),
        )
        .unwrap();

    assert_eq!(std::fs::read(&path_file).unwrap(), path_before);
    assert_eq!(
        executor.get_document(id.as_str()).unwrap().paragraphs().len(),
        2
    );
}

#[test]
fn unknown_session_does_not_fall_back() {
    let dir = tempfile::tempdir().unwrap();
    let path_file = write_doc(dir.path(), "path.json", &["PathX"]);
    let executor = create_executor();

    let err = executor
        .execute(
            Request::new("get_paragraphs")
                .session("ses_doesnotexist")
                .path(&path_file),
        )
        .unwrap_err();
    assert!(matches!(err, Error::SessionNotFound { ref session_id } if session_id == "ses_doesnotexist"));
}

#[test]
fn empty_session_id_uses_path() {
    let dir = tempfile::tempdir().unwrap();
    let path_file = write_doc(dir.path(), "path.json", &["PathX"]);
    let executor = create_executor();

    let envelope = executor
        .execute_json(&serde_json::json!({
            "operation": "get_paragraphs",
            "sessionId": "",
            "path": path_file.to_str().unwrap(),
        }))
        .unwrap();
    assert!(!envelope.is_session);
    assert_eq!(envelope.session_id, None);
    assert_eq!(extract_paragraph_texts(&envelope.payload), vec!["PathX"]);
}
