//! Command Dispatch Tests
//!
//! Operation names route case-insensitively; unknown names fail before any
//! document is touched.

use crate::common::*;
use proptest::prelude::*;
use scribe::{Error, ErrorKind, Request};

#[test]
fn case_variants_route_to_same_handler() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_doc(dir.path(), "doc.json", &["a"]);
    let executor = create_executor();
    let id = executor.open_session(&path).unwrap();

    for spelling in ["ADD_PARAGRAPH", "Add_Paragraph", "add_paragraph"] {
        let envelope = executor
            .execute(
                Request::new(spelling)
                    .session(&id)
                    .param("text", spelling),
            )
            .unwrap();
        assert!(extract_message(&envelope.payload).starts_with("Added paragraph"));
    }

    let out = executor
        .execute(Request::new("get_paragraphs").session(&id))
        .unwrap();
    assert_eq!(
        extract_paragraph_texts(&out.payload),
        vec!["a", "ADD_PARAGRAPH", "Add_Paragraph", "add_paragraph"]
    );
}

#[test]
fn unknown_operation_reported_in_any_casing() {
    let executor = create_executor();
    for spelling in ["frobnicate", "FROBNICATE", "FrObNiCaTe"] {
        let err = executor.execute(Request::new(spelling)).unwrap_err();
        assert_eq!(
            err,
            Error::UnknownOperation {
                operation: spelling.to_string()
            }
        );
        assert_eq!(err.kind(), ErrorKind::Usage);
    }
}

#[test]
fn unknown_operation_checked_before_source() {
    let executor = create_executor();

    // No source at all: still UnknownOperation, not MissingSource
    assert!(matches!(
        executor.execute(Request::new("nope")).unwrap_err(),
        Error::UnknownOperation { .. }
    ));
    // Unknown session: still UnknownOperation, not SessionNotFound
    assert!(matches!(
        executor
            .execute(Request::new("nope").session("ses_missing"))
            .unwrap_err(),
        Error::UnknownOperation { .. }
    ));
    // Missing file: still UnknownOperation, not SourceLoad
    assert!(matches!(
        executor
            .execute(Request::new("nope").path("/definitely/not/here.json"))
            .unwrap_err(),
        Error::UnknownOperation { .. }
    ));
}

#[test]
fn missing_source_is_usage_error() {
    let executor = create_executor();
    let err = executor
        .execute(Request::new("get_paragraphs"))
        .unwrap_err();
    assert!(matches!(err, Error::MissingSource { .. }));
    assert_eq!(err.kind(), ErrorKind::Usage);
}

#[test]
fn every_builtin_operation_is_listed() {
    let executor = create_executor();
    let ops = executor.registry().operations();
    for (name, _) in valid_requests() {
        assert!(ops.contains(&name), "{} not registered", name);
    }
    assert!(ops.contains(&"create_document"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn any_casing_of_a_builtin_resolves(mask in proptest::collection::vec(any::<bool>(), 32)) {
        let executor = create_executor();
        for name in executor.registry().operations() {
            let spelled: String = name
                .chars()
                .zip(mask.iter().cycle())
                .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
                .collect();
            prop_assert!(executor.registry().lookup(&spelled).is_ok());
        }
    }
}
