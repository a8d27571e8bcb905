//! Persistence Tests
//!
//! Ephemeral calls write back only when they modify the document; session
//! calls never write implicitly.

use std::time::Duration;

use crate::common::*;
use scribe::{Error, Request};

#[test]
fn ephemeral_mutation_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_doc(dir.path(), "doc.json", &["body"]);
    let executor = create_executor();

    executor
        .execute(
            Request::new("add_paragraph")
                .path(&path)
                .param("text", "appended"),
        )
        .unwrap();

    let doc = read_doc(&path);
    assert_eq!(doc.paragraphs().len(), 2);
    assert_eq!(doc.paragraphs()[1].text, "appended");
}

#[test]
fn read_only_call_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_doc(dir.path(), "doc.json", &["body"]);
    let bytes_before = std::fs::read(&path).unwrap();
    let mtime_before = std::fs::metadata(&path).unwrap().modified().unwrap();
    let executor = create_executor();

    std::thread::sleep(Duration::from_millis(20));
    for operation in [
        "get_document_info",
        "get_paragraphs",
        "get_footnotes",
        "get_bookmarks",
        "get_tables",
        "get_properties",
        "export_text",
    ] {
        executor
            .execute(Request::new(operation).path(&path))
            .unwrap();
    }

    assert_eq!(std::fs::read(&path).unwrap(), bytes_before);
    assert_eq!(
        std::fs::metadata(&path).unwrap().modified().unwrap(),
        mtime_before
    );
}

#[test]
fn output_path_redirects_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_doc(dir.path(), "in.json", &["body"]);
    let out = dir.path().join("out.json");
    let before = std::fs::read(&path).unwrap();
    let executor = create_executor();

    executor
        .execute(
            Request::new("add_paragraph")
                .path(&path)
                .output_path(&out)
                .param("text", "redirected"),
        )
        .unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), before);
    assert!(read_doc(&out).contains_text("redirected"));
}

#[test]
fn session_mutation_not_written_until_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_doc(dir.path(), "doc.json", &["body"]);
    let before = std::fs::read(&path).unwrap();
    let executor = create_executor();
    let id = executor.open_session(&path).unwrap();

    executor
        .execute(
            Request::new("set_property")
                .session(&id)
                .param("name", "author")
                .param("value", "Ada"),
        )
        .unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), before);

    let out = dir.path().join("saved.json");
    executor.save_session(id.as_str(), Some(out.as_path())).unwrap();
    assert_eq!(
        read_doc(&out).properties().get("author").map(String::as_str),
        Some("Ada")
    );
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[test]
fn missing_file_is_source_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let executor = create_executor();
    let err = executor
        .execute(Request::new("get_paragraphs").path(dir.path().join("absent.json")))
        .unwrap_err();
    assert!(matches!(err, Error::SourceLoad { .. }));
}

#[test]
fn corrupt_file_is_source_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrupt.json");
    std::fs::write(&path, b"{ not json").unwrap();
    let executor = create_executor();

    let err = executor
        .execute(Request::new("get_paragraphs").path(&path))
        .unwrap_err();
    assert!(matches!(err, Error::SourceLoad { .. }));
    assert_eq!(std::fs::read(&path).unwrap(), b"{ not json");
}

#[test]
fn create_then_edit_ephemerally() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh.json");
    let executor = create_executor();

    executor
        .execute(
            Request::new("create_document")
                .path(&path)
                .param("title", "Fresh"),
        )
        .unwrap();
    executor
        .execute(
            Request::new("add_paragraph")
                .path(&path)
                .param("text", "first"),
        )
        .unwrap();

    let doc = read_doc(&path);
    assert_eq!(doc.properties().get("title").map(String::as_str), Some("Fresh"));
    assert_eq!(doc.paragraphs()[0].text, "first");
}

#[test]
fn structurally_invalid_file_is_source_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ragged.json");
    let body = r#"{"tables":[{"cells":[[{"text":"a"},{"text":"b"}],[{"text":"c"}]]}]}"#;
    std::fs::write(&path, body).unwrap();
    let executor = create_executor();

    let request = serde_json::json!({
        "operation": "set_cell_colors",
        "path": path.to_string_lossy(),
        "tableIndex": 0,
        "cells": [{"row": 1, "column": 1, "color": "red"}]
    });
    let err = executor.execute_json(&request).unwrap_err();
    assert!(matches!(err, Error::SourceLoad { .. }));
    assert_eq!(std::fs::read(&path).unwrap(), body.as_bytes());

    assert!(matches!(
        executor.open_session(&path),
        Err(Error::SourceLoad { .. })
    ));
}

#[test]
fn footnote_ids_continue_past_stored_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.json");
    std::fs::write(
        &path,
        r#"{"paragraphs":[{"text":"a"}],"footnotes":[{"id":1,"paragraph_index":0,"text":"old"}]}"#,
    )
    .unwrap();
    let executor = create_executor();

    let envelope = executor
        .execute(
            Request::new("add_footnote")
                .path(&path)
                .param("paragraphIndex", 0i64)
                .param("text", "new"),
        )
        .unwrap();
    assert_eq!(
        extract_message(&envelope.payload),
        "Added footnote 2 to paragraph 0"
    );

    let ids: Vec<u32> = read_doc(&path).footnotes().iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![1, 2]);
}
