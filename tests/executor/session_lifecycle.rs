//! Session Lifecycle Tests
//!
//! Open, use, save, close, and eviction, observed through the executor.

use std::time::{Duration, Instant};

use crate::common::*;
use scribe::{Error, Request, ScribeConfig};

#[test]
fn sequential_calls_compose() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_doc(dir.path(), "doc.json", &["body"]);
    let executor = create_executor();
    let id = executor.open_session(&path).unwrap();

    executor
        .execute(
            Request::new("add_footnote")
                .session(&id)
                .param("paragraphIndex", 0i64)
                .param("text", "See appendix"),
        )
        .unwrap();
    let envelope = executor
        .execute(Request::new("get_footnotes").session(&id))
        .unwrap();
    match envelope.payload {
        scribe::Output::Footnotes(notes) => {
            assert_eq!(notes.len(), 1);
            assert_eq!(notes[0].text, "See appendix");
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn closed_session_is_not_found_for_every_operation() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_doc(dir.path(), "doc.json", &["body"]);
    let executor = create_executor();
    let id = executor.open_session(&path).unwrap();
    executor.close_session(id.as_str()).unwrap();

    for (operation, params) in valid_requests() {
        let request = flat_request(operation, ("sessionId", id.as_str()), &params);
        let err = executor.execute_json(&request).unwrap_err();
        assert!(
            matches!(err, Error::SessionNotFound { .. }),
            "{} returned {:?}",
            operation,
            err
        );
    }
}

#[test]
fn never_issued_session_is_not_found_for_every_operation() {
    let executor = create_executor();
    for (operation, params) in valid_requests() {
        let request = flat_request(operation, ("sessionId", "ses_never_issued"), &params);
        let err = executor.execute_json(&request).unwrap_err();
        assert!(err.is_not_found(), "{} returned {:?}", operation, err);
    }
}

#[test]
fn close_unknown_session_fails() {
    let executor = create_executor();
    assert!(matches!(
        executor.close_session("ses_unknown").unwrap_err(),
        Error::SessionNotFound { .. }
    ));
}

#[test]
fn unsaved_changes_are_discarded_on_close() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_doc(dir.path(), "doc.json", &["body"]);
    let before = std::fs::read(&path).unwrap();
    let executor = create_executor();
    let id = executor.open_session(&path).unwrap();

    executor
        .execute(Request::new("add_paragraph").session(&id).param("text", "lost"))
        .unwrap();
    executor.close_session(id.as_str()).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[test]
fn saved_changes_reach_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_doc(dir.path(), "doc.json", &["body"]);
    let executor = create_executor();
    let id = executor.open_session(&path).unwrap();

    executor
        .execute(Request::new("add_paragraph").session(&id).param("text", "kept"))
        .unwrap();
    executor.save_session(id.as_str(), None).unwrap();
    executor.close_session(id.as_str()).unwrap();

    assert!(read_doc(&path).contains_text("kept"));
}

#[test]
fn idle_sessions_are_evicted() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_doc(dir.path(), "doc.json", &["body"]);
    let executor = create_executor_with(ScribeConfig {
        idle_timeout_secs: 60,
        sweep_interval_secs: 0,
        ..ScribeConfig::default()
    });
    let stale = executor.open_session(&path).unwrap();

    let later = Instant::now() + Duration::from_secs(120);
    let evicted = executor.sessions().evict_idle_as_of(later);
    assert_eq!(evicted, vec![stale.clone()]);

    let err = executor
        .execute(Request::new("get_paragraphs").session(&stale))
        .unwrap_err();
    assert!(matches!(err, Error::SessionNotFound { .. }));
}

#[test]
fn recently_used_sessions_survive_eviction() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_doc(dir.path(), "doc.json", &["body"]);
    let executor = create_executor_with(ScribeConfig {
        idle_timeout_secs: 60,
        sweep_interval_secs: 0,
        ..ScribeConfig::default()
    });
    let id = executor.open_session(&path).unwrap();
    executor
        .execute(Request::new("get_paragraphs").session(&id))
        .unwrap();

    assert!(executor.sessions().evict_idle().is_empty());
    assert_eq!(executor.list_sessions().len(), 1);
}
