//! Small collection builders and accessors used alongside the engines.
//!
//! All functions are pure and return new values.

use crate::error::{CollError, Result};
use crate::value::{Mapping, Value};

/// Build a mapping from alternating key/value arguments.
///
/// A trailing key without a value maps to the empty string. Numbers and
/// booleans are accepted as keys through their display form.
///
/// # Errors
///
/// Returns [`CollError::InvalidDictKey`] when a key argument is null, an
/// object, a sequence or a mapping.
///
/// # Examples
///
/// ```
/// use coll_core::{dict, Value};
///
/// let map = dict(&["foo".into(), 1.into(), "bar".into()]).unwrap();
/// assert_eq!(Value::from(map).to_string(), r#"{"bar":"","foo":1}"#);
/// ```
pub fn dict(pairs: &[Value]) -> Result<Mapping> {
    let mut map = Mapping::new();
    for (pair, chunk) in pairs.chunks(2).enumerate() {
        let index = pair * 2;
        let key = match &chunk[0] {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => return Err(CollError::InvalidDictKey { index }),
        };
        let value = chunk.get(1).cloned().unwrap_or_else(|| Value::from(""));
        map.insert(key, value);
    }
    Ok(map)
}

/// Whether `data` contains `needle`: a key of a mapping (when `needle` is a
/// string), or an element of a sequence.
pub fn has(data: &Value, needle: &Value) -> bool {
    match data {
        Value::Mapping(map) => needle.as_str().is_some_and(|key| map.contains_key(key)),
        Value::Sequence(items) => items.contains(needle),
        _ => false,
    }
}

/// Keys of each mapping in sorted order, concatenated across `maps`.
pub fn keys(maps: &[&Mapping]) -> Vec<Value> {
    maps.iter()
        .flat_map(|map| map.keys().map(|key| Value::from(key.as_str())))
        .collect()
}

/// Values of each mapping in key order, concatenated across `maps`.
pub fn values(maps: &[&Mapping]) -> Vec<Value> {
    maps.iter()
        .flat_map(|map| map.values().cloned())
        .collect()
}

/// A copy of `list` with `value` added at the end.
pub fn append(value: Value, list: &[Value]) -> Vec<Value> {
    let mut out = Vec::with_capacity(list.len() + 1);
    out.extend_from_slice(list);
    out.push(value);
    out
}

/// A copy of `list` with `value` added at the front.
pub fn prepend(value: Value, list: &[Value]) -> Vec<Value> {
    let mut out = Vec::with_capacity(list.len() + 1);
    out.push(value);
    out.extend_from_slice(list);
    out
}

pub fn reverse(list: &[Value]) -> Vec<Value> {
    list.iter().rev().cloned().collect()
}

/// `list` without repeated elements, keeping each first occurrence.
///
/// Equality is value equality, so `3` and `3.0` count as duplicates.
pub fn uniq(list: &[Value]) -> Vec<Value> {
    let mut out: Vec<Value> = Vec::with_capacity(list.len());
    for item in list {
        if !out.contains(item) {
            out.push(item.clone());
        }
    }
    out
}
