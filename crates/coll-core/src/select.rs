//! Shallow key selection on mappings: keep ([`pick`]) or drop ([`omit`]) a
//! set of top-level keys.
//!
//! Both return a new mapping; nested values are carried over unchanged and
//! never filtered recursively.

use crate::value::Mapping;

/// Keep only the entries of `data` whose key is listed in `keys`.
///
/// Listed keys that `data` does not contain are skipped.
///
/// # Examples
///
/// ```
/// use coll_core::{pick, Value};
///
/// let data = Value::from_json(r#"{"foo":1,"bar":2,"baz":3}"#).unwrap();
/// let picked = pick(&["foo", "baz", "qux"], data.as_mapping().unwrap());
/// assert_eq!(Value::from(picked).to_string(), r#"{"baz":3,"foo":1}"#);
/// ```
pub fn pick<S: AsRef<str>>(keys: &[S], data: &Mapping) -> Mapping {
    keys.iter()
        .filter_map(|key| {
            let key = key.as_ref();
            data.get_key_value(key)
                .map(|(k, v)| (k.clone(), v.clone()))
        })
        .collect()
}

/// Copy every entry of `data` except those whose key is listed in `keys`.
///
/// # Examples
///
/// ```
/// use coll_core::{omit, Value};
///
/// let data = Value::from_json(r#"{"foo":1,"bar":2,"baz":3}"#).unwrap();
/// let rest = omit(&["foo", "baz"], data.as_mapping().unwrap());
/// assert_eq!(Value::from(rest).to_string(), r#"{"bar":2}"#);
/// ```
pub fn omit<S: AsRef<str>>(keys: &[S], data: &Mapping) -> Mapping {
    data.iter()
        .filter(|(key, _)| !contains(keys, key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

fn contains<S: AsRef<str>>(keys: &[S], key: &str) -> bool {
    keys.iter().any(|k| k.as_ref() == key)
}
