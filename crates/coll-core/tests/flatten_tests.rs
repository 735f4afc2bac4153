//! Tests for flatten depth semantics.

use coll_core::{flatten, flatten_all, Value, UNBOUNDED};

const NESTED: &str = "[[1,2],[],[[3,4],[[[5],6],7]]]";

fn json(s: &str) -> Value {
    Value::from_json(s).unwrap()
}

fn flat(depth: i64, data: &str) -> String {
    let data = json(data);
    Value::from(flatten(depth, data.as_sequence().unwrap())).to_string()
}

#[test]
fn depth_zero_is_identity() {
    assert_eq!(flat(0, NESTED), NESTED);
}

#[test]
fn depth_one_unrolls_one_level() {
    assert_eq!(flat(1, NESTED), "[1,2,[3,4],[[[5],6],7]]");
}

#[test]
fn depth_two_unrolls_two_levels() {
    assert_eq!(flat(2, NESTED), "[1,2,3,4,[[5],6],7]");
}

#[test]
fn unbounded_flattens_completely() {
    assert_eq!(flat(UNBOUNDED, NESTED), "[1,2,3,4,5,6,7]");
    assert_eq!(flat(-42, NESTED), "[1,2,3,4,5,6,7]");

    let data = json(NESTED);
    assert_eq!(
        Value::from(flatten_all(data.as_sequence().unwrap())).to_string(),
        "[1,2,3,4,5,6,7]"
    );
}

#[test]
fn most_negative_depth_flattens_completely() {
    assert_eq!(flat(i64::MIN, "[[1,[2]]]"), "[1,2]");
    assert_eq!(flat(i64::MIN, NESTED), "[1,2,3,4,5,6,7]");
}

#[test]
fn depth_beyond_nesting_equals_unbounded() {
    assert_eq!(flat(10, NESTED), flat(UNBOUNDED, NESTED));
}

#[test]
fn mappings_and_scalars_are_never_unrolled() {
    assert_eq!(
        flat(UNBOUNDED, r#"[{"a":[1,[2]]},["x",[{"b":[3]}]],null,true]"#),
        r#"[{"a":[1,[2]]},"x",{"b":[3]},null,true]"#
    );
}

#[test]
fn empty_inputs() {
    assert_eq!(flat(UNBOUNDED, "[]"), "[]");
    assert_eq!(flat(UNBOUNDED, "[[],[[]]]"), "[]");
    assert_eq!(flat(1, "[[],[[]]]"), "[[]]");
}

#[test]
fn flatten_is_idempotent() {
    let data = json(NESTED);
    let once = flatten_all(data.as_sequence().unwrap());
    let twice = flatten_all(&once);
    assert_eq!(once, twice);
}

#[test]
fn input_is_not_modified() {
    let data = json(NESTED);
    let _ = flatten_all(data.as_sequence().unwrap());
    assert_eq!(data.to_string(), NESTED);
}
