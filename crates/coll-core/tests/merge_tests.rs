//! Tests for deep merge precedence, recursion and shape handling.

use coll_core::{merge, merge_into, CollError, Value};

fn json(s: &str) -> Value {
    Value::from_json(s).unwrap()
}

/// The `defaults.yaml` document, as JSON.
fn defaults() -> Value {
    json(r#"{"values":{"one":1,"two":2,"three":[4],"four":{"a":"a","b":"b"}}}"#)
}

/// The `config.json` document.
fn config() -> Value {
    json(r#"{"values":{"one":"uno","three":[5,6,7],"four":{"a":"eh?"}}}"#)
}

// ============================================================================
// 1. Precedence
// ============================================================================

#[test]
fn config_over_defaults() {
    let merged = merge(config(), [&defaults()]).unwrap();
    assert_eq!(
        merged,
        json(r#"{"values":{"four":{"a":"eh?","b":"b"},"one":"uno","three":[5,6,7],"two":2}}"#)
    );
}

#[test]
fn override_keys_are_never_replaced() {
    let overrides = json(r#"{"a":1,"b":"keep"}"#);
    let s1 = json(r#"{"a":100,"b":"lose","c":3}"#);
    let s2 = json(r#"{"a":200,"d":4}"#);

    let merged = merge(overrides, [&s1, &s2]).unwrap();
    assert_eq!(merged, json(r#"{"a":1,"b":"keep","c":3,"d":4}"#));
}

#[test]
fn earlier_source_wins_over_later_source() {
    let merged = merge(json("{}"), [&json(r#"{"k":"first"}"#), &json(r#"{"k":"second"}"#)]).unwrap();
    assert_eq!(merged, json(r#"{"k":"first"}"#));
}

#[test]
fn no_sources_returns_overrides_unchanged() {
    let merged = merge(config(), std::iter::empty()).unwrap();
    assert_eq!(merged, config());
}

#[test]
fn null_in_destination_is_filled() {
    let merged = merge(json(r#"{"a":null}"#), [&json(r#"{"a":{"x":1}}"#)]).unwrap();
    assert_eq!(merged, json(r#"{"a":{"x":1}}"#));
}

// ============================================================================
// 2. Recursion and sequences
// ============================================================================

#[test]
fn nested_mappings_combine() {
    let merged = merge(
        json(r#"{"four":{"a":"eh?"}}"#),
        [&json(r#"{"four":{"a":"a","b":"b"}}"#)],
    )
    .unwrap();
    assert_eq!(merged, json(r#"{"four":{"a":"eh?","b":"b"}}"#));
}

#[test]
fn deeply_nested_mappings_combine() {
    let merged = merge(
        json(r#"{"a":{"b":{"c":{"d":1}}}}"#),
        [&json(r#"{"a":{"b":{"c":{"e":2},"f":3}}}"#)],
    )
    .unwrap();
    assert_eq!(merged, json(r#"{"a":{"b":{"c":{"d":1,"e":2},"f":3}}}"#));
}

#[test]
fn override_sequence_is_kept_whole() {
    let merged = merge(json(r#"{"three":[5,6,7]}"#), [&json(r#"{"three":[4]}"#)]).unwrap();
    assert_eq!(merged, json(r#"{"three":[5,6,7]}"#));
}

#[test]
fn absent_sequence_is_copied_verbatim() {
    let merged = merge(json(r#"{"one":1}"#), [&json(r#"{"three":[4,[5]]}"#)]).unwrap();
    assert_eq!(merged, json(r#"{"one":1,"three":[4,[5]]}"#));
}

#[test]
fn sequence_root_is_kept_when_non_empty() {
    let merged = merge(json("[1,2]"), [&json("[3]")]).unwrap();
    assert_eq!(merged, json("[1,2]"));
}

#[test]
fn empty_sequence_root_is_kept() {
    let merged = merge(json("[]"), [&json("[3]"), &json("[4]")]).unwrap();
    assert_eq!(merged, json("[]"));

    let nested = merge(json(r#"{"k":[]}"#), [&json(r#"{"k":[4]}"#)]).unwrap();
    assert_eq!(nested, json(r#"{"k":[]}"#));
}

// ============================================================================
// 3. Shape conflicts and errors
// ============================================================================

#[test]
fn scalar_in_destination_beats_source_mapping() {
    let merged = merge(json(r#"{"a":"scalar"}"#), [&json(r#"{"a":{"x":1}}"#)]).unwrap();
    assert_eq!(merged, json(r#"{"a":"scalar"}"#));
}

#[test]
fn mapping_in_destination_beats_source_scalar() {
    let merged = merge(json(r#"{"a":{"x":1}}"#), [&json(r#"{"a":[1,2]}"#)]).unwrap();
    assert_eq!(merged, json(r#"{"a":{"x":1}}"#));
}

#[test]
fn source_with_other_root_shape_is_skipped() {
    let merged = merge(json(r#"{"a":1}"#), [&json("[1,2]"), &json(r#""str""#), &json(r#"{"b":2}"#)]).unwrap();
    assert_eq!(merged, json(r#"{"a":1,"b":2}"#));
}

#[test]
fn scalar_root_is_rejected() {
    for root in ["1", r#""text""#, "true", "null"] {
        let err = merge(json(root), [&json("{}")]).unwrap_err();
        assert!(
            matches!(err, CollError::UnsupportedMergeType { .. }),
            "root {} should be rejected, got {:?}",
            root,
            err
        );
    }
}

#[test]
fn unsupported_type_error_names_the_kind() {
    let err = merge(json("42"), std::iter::empty()).unwrap_err();
    assert!(err.to_string().contains("number"), "message: {}", err);
}

#[test]
fn merge_into_fills_destination_in_place() {
    let mut dest = json(r#"{"a":1}"#);
    merge_into(&mut dest, [&json(r#"{"b":2}"#)]).unwrap();
    assert_eq!(dest, json(r#"{"a":1,"b":2}"#));
}

#[test]
fn sources_are_not_modified() {
    let source = defaults();
    let before = source.clone();
    let _ = merge(config(), [&source]).unwrap();
    assert_eq!(source, before);
}

#[test]
fn merged_output_renders_keys_alphabetically() {
    let merged = merge(config(), [&defaults()]).unwrap();
    assert_eq!(
        merged.to_json().unwrap(),
        r#"{"values":{"four":{"a":"eh?","b":"b"},"one":"uno","three":[5,6,7],"two":2}}"#
    );
}
