// tests/extract_fields.rs

use serde_json::json;

use sfnview::errors::QueryError;
use sfnview::extract::{Extraction, FieldExtractor, Query};

const DEFAULT_EXPRESSION: &str = "{ id: detail.id, type: detail.type }";

fn extractor(expression: &str) -> FieldExtractor {
    FieldExtractor::new(Query::compile(expression).expect("expression should compile"))
}

fn fields(extraction: Extraction) -> serde_json::Value {
    match extraction {
        Extraction::Fields(fields) => serde_json::Value::Object(fields),
        Extraction::Malformed(e) => panic!("expected fields, got malformed payload: {e}"),
    }
}

#[test]
fn object_construction_extracts_named_fields() {
    let ex = extractor(DEFAULT_EXPRESSION);
    let result = ex
        .extract(Some(r#"{"detail":{"id":"x1","type":"Created"}}"#))
        .unwrap();

    assert_eq!(fields(result), json!({"id": "x1", "type": "Created"}));
}

#[test]
fn extracted_keys_iterate_in_sorted_order() {
    let ex = extractor("{ zeta: a, alpha: b, mid: c }");
    let result = ex.extract(Some(r#"{"a":1,"b":2,"c":3}"#)).unwrap();

    let Extraction::Fields(map) = result else {
        panic!("expected fields");
    };
    let keys: Vec<&str> = map.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["alpha", "mid", "zeta"]);
}

#[test]
fn nested_paths_and_structured_values_are_kept() {
    let ex = extractor("{ region: detail.meta.region, items: detail.items }");
    let result = ex
        .extract(Some(
            r#"{"detail":{"meta":{"region":"eu"},"items":[1,2,3]}}"#,
        ))
        .unwrap();

    assert_eq!(fields(result), json!({"region": "eu", "items": [1, 2, 3]}));
}

#[test]
fn unmatched_paths_yield_null_values() {
    let ex = extractor(DEFAULT_EXPRESSION);
    let result = ex.extract(Some(r#"{"other":true}"#)).unwrap();

    assert_eq!(fields(result), json!({"id": null, "type": null}));
}

#[test]
fn null_result_is_an_empty_mapping() {
    let ex = extractor("detail");
    let result = ex.extract(Some(r#"{"nothing":"here"}"#)).unwrap();

    assert_eq!(fields(result), json!({}));
}

#[test]
fn missing_payload_is_a_null_document() {
    let ex = extractor(DEFAULT_EXPRESSION);
    let result = ex.extract(None).unwrap();

    assert_eq!(fields(result), json!({}));
}

#[test]
fn malformed_payload_is_reported_not_evaluated() {
    let ex = extractor(DEFAULT_EXPRESSION);

    match ex.extract(Some("{not json")).unwrap() {
        Extraction::Malformed(err) => assert!(err.is_syntax() || err.is_eof()),
        Extraction::Fields(f) => panic!("expected malformed payload, got {f:?}"),
    }
}

#[test]
fn scalar_result_is_unexpected_shape() {
    let ex = extractor("detail.id");
    let err = ex
        .extract(Some(r#"{"detail":{"id":"x1"}}"#))
        .unwrap_err();

    match err {
        QueryError::UnexpectedShape { expression, found } => {
            assert_eq!(expression, "detail.id");
            assert_eq!(found, "a string");
        }
        other => panic!("expected UnexpectedShape, got {other:?}"),
    }
}

#[test]
fn array_result_is_unexpected_shape() {
    let ex = extractor("detail.items");
    let err = ex
        .extract(Some(r#"{"detail":{"items":[1]}}"#))
        .unwrap_err();

    assert!(matches!(
        err,
        QueryError::UnexpectedShape { found: "an array", .. }
    ));
}

#[test]
fn invalid_expression_fails_to_compile() {
    let err = Query::compile("{ id: ").unwrap_err();

    match err {
        QueryError::Invalid { expression, reason } => {
            assert_eq!(expression, "{ id: ");
            assert!(!reason.is_empty());
        }
        other => panic!("expected Invalid, got {other:?}"),
    }
}
