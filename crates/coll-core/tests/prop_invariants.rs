/// Property-based tests for the collection engines.
///
/// Uses `proptest` to generate random value trees and check the invariants
/// that hold for every input, not just hand-picked fixtures:
///
/// - merge never changes a key already present in the destination
/// - merge fills keys from the first source that defines them
/// - sort is idempotent, stable and a permutation of its input
/// - flatten(0) is identity, unbounded flatten leaves no nested sequences
/// - pick and omit partition a mapping
use coll_core::{flatten, flatten_all, merge, omit, pick, sort, Mapping, Value};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn arb_key() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-e]{1,2}").unwrap()
}

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        (-1000i64..1000).prop_map(Value::from),
        (-1000.0f64..1000.0).prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::from),
    ]
}

/// Arbitrary value trees up to three levels deep.
fn arb_value() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
            prop::collection::btree_map(arb_key(), inner, 0..4).prop_map(Value::from),
        ]
    })
}

fn arb_mapping() -> impl Strategy<Value = Mapping> {
    prop::collection::btree_map(arb_key(), arb_value(), 0..6)
}

/// Sequences of nested numbers only.
fn arb_nested_numbers() -> impl Strategy<Value = Value> {
    (0i64..100)
        .prop_map(Value::from)
        .prop_recursive(4, 32, 4, |inner| {
            prop::collection::vec(inner, 0..4).prop_map(Value::from)
        })
}

fn max_nesting(values: &[Value]) -> usize {
    values
        .iter()
        .map(|v| match v {
            Value::Sequence(inner) => 1 + max_nesting(inner),
            _ => 0,
        })
        .max()
        .unwrap_or(0)
}

// ============================================================================
// Merge
// ============================================================================

proptest! {
    #[test]
    fn merge_keeps_every_non_null_destination_key(
        dest in arb_mapping(),
        s1 in arb_mapping(),
        s2 in arb_mapping(),
    ) {
        let merged = merge(Value::from(dest.clone()), [&Value::from(s1), &Value::from(s2)]).unwrap();
        let merged = merged.as_mapping().unwrap();
        for (key, value) in &dest {
            match value {
                // Mappings may gain keys; everything else is untouched.
                Value::Mapping(_) | Value::Null => prop_assert!(merged.contains_key(key)),
                other => prop_assert_eq!(merged.get(key), Some(other)),
            }
        }
    }

    #[test]
    fn merge_absent_key_takes_first_source(
        s1 in arb_mapping(),
        s2 in arb_mapping(),
    ) {
        let merged = merge(Value::from(Mapping::new()), [&Value::from(s1.clone()), &Value::from(s2.clone())]).unwrap();
        let merged = merged.as_mapping().unwrap();
        for (key, value) in &s2 {
            if !s1.contains_key(key) {
                prop_assert_eq!(merged.get(key), Some(value));
            }
        }
        for (key, value) in &s1 {
            if !value.is_null() && !matches!(value, Value::Mapping(_)) {
                prop_assert_eq!(merged.get(key), Some(value));
            }
        }
    }

    #[test]
    fn merge_with_itself_is_identity(dest in arb_mapping()) {
        let value = Value::from(dest);
        let merged = merge(value.clone(), [&value]).unwrap();
        prop_assert_eq!(merged, value);
    }
}

// ============================================================================
// Sort
// ============================================================================

proptest! {
    #[test]
    fn sort_numbers_is_ordered_permutation(nums in prop::collection::vec(-1e6f64..1e6, 0..40)) {
        let data: Vec<Value> = nums.iter().copied().map(Value::from).collect();
        let sorted = sort(None, &data).unwrap();

        prop_assert_eq!(sorted.len(), data.len());
        for pair in sorted.windows(2) {
            prop_assert!(pair[0].as_number().unwrap() <= pair[1].as_number().unwrap());
        }
        for item in &data {
            let count_in = data.iter().filter(|v| *v == item).count();
            let count_out = sorted.iter().filter(|v| *v == item).count();
            prop_assert_eq!(count_in, count_out);
        }
    }

    #[test]
    fn sort_is_idempotent(words in prop::collection::vec("[a-z]{0,5}", 0..30)) {
        let data: Vec<Value> = words.into_iter().map(Value::from).collect();
        let once = sort(None, &data).unwrap();
        let twice = sort(None, &once).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn sort_by_key_is_stable(keys in prop::collection::vec(0i64..5, 0..30)) {
        let data: Vec<Value> = keys
            .iter()
            .enumerate()
            .map(|(i, k)| {
                let mut row = Mapping::new();
                row.insert("k".to_string(), Value::from(*k));
                row.insert("i".to_string(), Value::from(i as i64));
                Value::from(row)
            })
            .collect();
        let sorted = sort(Some("k"), &data).unwrap();
        for pair in sorted.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let (ka, kb) = (a.get("k").unwrap(), b.get("k").unwrap());
            if ka == kb {
                let (ia, ib) = (a.get("i").unwrap().as_number().unwrap(), b.get("i").unwrap().as_number().unwrap());
                prop_assert!(ia < ib);
            }
        }
    }
}

// ============================================================================
// Flatten
// ============================================================================

proptest! {
    #[test]
    fn flatten_zero_is_identity(items in prop::collection::vec(arb_nested_numbers(), 0..6)) {
        prop_assert_eq!(flatten(0, &items), items);
    }

    #[test]
    fn unbounded_flatten_leaves_no_nesting(items in prop::collection::vec(arb_nested_numbers(), 0..6)) {
        let flat = flatten_all(&items);
        prop_assert_eq!(max_nesting(&flat), 0);
        prop_assert_eq!(flatten_all(&flat), flat);
    }

    #[test]
    fn flatten_depth_reduces_nesting(items in prop::collection::vec(arb_nested_numbers(), 0..6), depth in 1i64..4) {
        let before = max_nesting(&items);
        let after = max_nesting(&flatten(depth, &items));
        prop_assert_eq!(after, before.saturating_sub(depth as usize));
    }
}

// ============================================================================
// Pick / omit
// ============================================================================

proptest! {
    #[test]
    fn pick_and_omit_partition(map in arb_mapping(), keys in prop::collection::vec(arb_key(), 0..6)) {
        let picked = pick(&keys, &map);
        let rest = omit(&keys, &map);

        for key in picked.keys() {
            prop_assert!(keys.contains(key));
            prop_assert!(!rest.contains_key(key));
        }
        for key in rest.keys() {
            prop_assert!(!keys.contains(key));
        }

        let mut union = picked;
        union.extend(rest);
        prop_assert_eq!(union, map);
    }
}
