//! Adversarial Tests for Executor Layer
//!
//! These tests check invariants under concurrency:
//! - Concurrent calls against one session lose no updates
//! - Distinct sessions proceed independently
//! - Open/close churn never leaves a half-registered session
//! - Eviction racing with in-flight calls never loses a locked session
//! - Concurrent ephemeral writes to one file never tear it

use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

use crate::common::*;
use scribe::{Error, Executor, Output, Request, ScribeConfig};

// ============================================================================
// Same-session serialization
// ============================================================================

/// N threads each add one footnote to the same session; all N must land
/// with distinct ids.
#[test]
fn concurrent_session_calls_lose_no_updates() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 25;

    let dir = tempfile::tempdir().unwrap();
    let path = write_doc(dir.path(), "doc.json", &["body"]);
    let executor = create_executor();
    let id = executor.open_session(&path).unwrap();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let executor = executor.clone();
            let id = id.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..PER_THREAD {
                    executor
                        .execute(
                            Request::new("add_footnote")
                                .session(&id)
                                .param("paragraphIndex", 0i64)
                                .param("text", format!("t{}-{}", t, i)),
                        )
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let envelope = executor
        .execute(Request::new("get_footnotes").session(&id))
        .unwrap();
    let notes = match envelope.payload {
        Output::Footnotes(notes) => notes,
        other => panic!("unexpected {:?}", other),
    };
    assert_eq!(notes.len(), THREADS * PER_THREAD);
    let mut ids: Vec<u32> = notes.iter().map(|n| n.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), THREADS * PER_THREAD);
}

/// Ephemeral writers racing on one file: every call succeeds and the file
/// always parses. Updates may be lost; bytes may not be mixed.
#[test]
fn concurrent_ephemeral_writes_keep_file_whole() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 25;

    let dir = tempfile::tempdir().unwrap();
    let path = write_doc(dir.path(), "doc.json", &["body"]);
    let executor = create_executor();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let executor = executor.clone();
            let path = path.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..PER_THREAD {
                    executor
                        .execute(
                            Request::new("set_property")
                                .path(&path)
                                .param("name", format!("k{}", t))
                                .param("value", "v".repeat(i + 1)),
                        )
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let doc = read_doc(&path);
    assert_eq!(doc.paragraphs()[0].text, "body");
    assert!(!doc.properties().is_empty());
    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

/// Readers interleaved with writers always observe a consistent paragraph
/// count (never a torn state between two writes).
#[test]
fn readers_see_whole_writes() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_doc(dir.path(), "doc.json", &[]);
    let executor = create_executor();
    let id = executor.open_session(&path).unwrap();

    let writer = {
        let executor = executor.clone();
        let id = id.clone();
        thread::spawn(move || {
            for i in 0..100 {
                executor
                    .execute(
                        Request::new("add_paragraph")
                            .session(&id)
                            .param("text", format!("p{}", i)),
                    )
                    .unwrap();
            }
        })
    };

    let mut last = 0;
    for _ in 0..100 {
        let envelope = executor
            .execute(Request::new("get_document_info").session(&id))
            .unwrap();
        if let Output::DocumentInfo(info) = envelope.payload {
            assert!(info.paragraphs >= last, "paragraph count went backwards");
            last = info.paragraphs;
        }
    }
    writer.join().unwrap();
    assert_eq!(
        executor.get_document(id.as_str()).unwrap().paragraphs().len(),
        100
    );
}

// ============================================================================
// Independent sessions
// ============================================================================

#[test]
fn distinct_sessions_are_isolated() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_doc(dir.path(), "doc.json", &["shared source"]);
    let executor = create_executor();

    let ids: Vec<_> = (0..4).map(|_| executor.open_session(&path).unwrap()).collect();
    let handles: Vec<_> = ids
        .iter()
        .cloned()
        .enumerate()
        .map(|(n, id)| {
            let executor = executor.clone();
            thread::spawn(move || {
                for _ in 0..=n {
                    executor
                        .execute(Request::new("add_paragraph").session(&id).param("text", "x"))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    for (n, id) in ids.iter().enumerate() {
        let doc = executor.get_document(id.as_str()).unwrap();
        assert_eq!(doc.paragraphs().len(), 1 + n + 1);
    }
}

// ============================================================================
// Lifecycle churn
// ============================================================================

#[test]
fn open_close_churn() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_doc(dir.path(), "doc.json", &["body"]);
    let executor = create_executor();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let executor = executor.clone();
            let path = path.clone();
            thread::spawn(move || {
                for _ in 0..20 {
                    let id = executor.open_session(&path).unwrap();
                    executor
                        .execute(Request::new("get_paragraphs").session(&id))
                        .unwrap();
                    executor.close_session(id.as_str()).unwrap();
                    assert!(matches!(
                        executor
                            .execute(Request::new("get_paragraphs").session(&id))
                            .unwrap_err(),
                        Error::SessionNotFound { .. }
                    ));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert!(executor.list_sessions().is_empty());
}

#[test]
fn session_limit_holds_under_contention() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_doc(dir.path(), "doc.json", &["body"]);
    let executor: Executor = create_executor_with(ScribeConfig {
        max_sessions: 5,
        sweep_interval_secs: 0,
        ..ScribeConfig::default()
    });
    let barrier = Arc::new(Barrier::new(16));

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let executor = executor.clone();
            let path = path.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                executor.open_session(&path).is_ok()
            })
        })
        .collect();
    let opened = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();

    assert_eq!(opened, 5);
    assert_eq!(executor.list_sessions().len(), 5);
}

// ============================================================================
// Eviction vs. in-flight calls
// ============================================================================

#[test]
fn eviction_skips_locked_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_doc(dir.path(), "doc.json", &["body"]);
    let executor = create_executor_with(ScribeConfig {
        idle_timeout_secs: 1,
        sweep_interval_secs: 0,
        ..ScribeConfig::default()
    });
    let id = executor.open_session(&path).unwrap();

    // Hold the session lock as an in-flight call would
    let entry = executor.sessions().get(id.as_str()).unwrap();
    let guard = entry.lock();
    let far_future = Instant::now() + Duration::from_secs(3600);
    assert!(executor.sessions().evict_idle_as_of(far_future).is_empty());
    drop(guard);

    assert_eq!(
        executor.sessions().evict_idle_as_of(far_future),
        vec![id.clone()]
    );
}
