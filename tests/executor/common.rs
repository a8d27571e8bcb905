//! Common test utilities for executor tests

use std::path::{Path, PathBuf};
use std::sync::Arc;

use scribe::{Document, Executor, Output, ParagraphStyle, ScribeConfig, SessionStore};

/// Create an executor with a fresh in-memory session store
pub fn create_executor() -> Executor {
    Executor::default()
}

/// Create an executor whose store never evicts on its own
#[allow(dead_code)]
pub fn create_executor_with(config: ScribeConfig) -> Executor {
    Executor::new(Arc::new(SessionStore::with_config(&config).unwrap()))
}

/// Write a document whose paragraphs are `paragraphs` to `dir/name`
pub fn write_doc(dir: &Path, name: &str, paragraphs: &[&str]) -> PathBuf {
    let mut doc = Document::new();
    for text in paragraphs {
        doc.insert_paragraph(None, *text, ParagraphStyle::Normal)
            .unwrap();
    }
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_vec_pretty(&doc).unwrap()).unwrap();
    path
}

/// Read a document back from disk
#[allow(dead_code)]
pub fn read_doc(path: &Path) -> Document {
    serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap()
}

/// Extract the message from Output::Message
#[allow(dead_code)]
pub fn extract_message(output: &Output) -> &str {
    match output {
        Output::Message(m) => m,
        _ => panic!("Expected Output::Message, got {:?}", output),
    }
}

/// Extract paragraph texts from Output::Paragraphs
#[allow(dead_code)]
pub fn extract_paragraph_texts(output: &Output) -> Vec<String> {
    match output {
        Output::Paragraphs(ps) => ps.iter().map(|p| p.text.clone()).collect(),
        _ => panic!("Expected Output::Paragraphs, got {:?}", output),
    }
}

/// Every built-in operation with a parameter set that passes validation on
/// a document holding at least one paragraph, one table and one footnote.
#[allow(dead_code)]
pub fn valid_requests() -> Vec<(&'static str, serde_json::Value)> {
    use serde_json::json;
    vec![
        ("get_document_info", json!({})),
        ("add_paragraph", json!({"text": "x"})),
        ("get_paragraphs", json!({})),
        ("edit_paragraph", json!({"paragraphIndex": 0, "text": "y"})),
        ("delete_paragraph", json!({"paragraphIndex": 0})),
        ("add_footnote", json!({"paragraphIndex": 0, "text": "n"})),
        ("get_footnotes", json!({})),
        ("delete_footnote", json!({"footnoteId": 1})),
        ("add_bookmark", json!({"name": "b", "paragraphIndex": 0})),
        ("get_bookmarks", json!({})),
        ("delete_bookmark", json!({"name": "b"})),
        ("add_table", json!({"rows": 1, "columns": 1})),
        ("set_cell_colors", json!({"tableIndex": 0, "cells": [{"row": 0, "column": 0, "color": "red"}]})),
        ("get_tables", json!({})),
        ("set_property", json!({"name": "k", "value": "v"})),
        ("get_properties", json!({})),
        ("protect_document", json!({"password": "pw"})),
        ("unprotect_document", json!({"password": "pw"})),
        ("export_text", json!({})),
    ]
}

/// Build a flat JSON request from an operation, a source and parameters
#[allow(dead_code)]
pub fn flat_request(
    operation: &str,
    source: (&str, &str),
    params: &serde_json::Value,
) -> serde_json::Value {
    let mut object = params.as_object().cloned().unwrap_or_default();
    object.insert("operation".into(), operation.into());
    object.insert(source.0.into(), source.1.into());
    serde_json::Value::Object(object)
}
