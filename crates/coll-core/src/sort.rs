//! Stable, type-aware sort over sequences of dynamic values.
//!
//! A comparison key is extracted from every element first, then the keys are
//! checked for a single common kind, then the elements are stably ordered by
//! key. Extraction depends on the element:
//!
//! - mappings need a `key` and yield the entry under it
//! - objects yield the field called `key`, or their canonical form without one
//! - other scalars are their own key (and reject a `key`)
//!
//! Keys compare within one kind only: numbers numerically (so `3 == 3.0`),
//! text (strings and object forms) by code point, booleans `false < true`.

use crate::error::{CollError, Result};
use crate::value::{Number, Value};
use std::borrow::Cow;
use std::cmp::Ordering;

/// Extracted, comparable sort key.
#[derive(Debug)]
enum SortKey<'a> {
    Number(Number),
    Text(Cow<'a, str>),
    Bool(bool),
}

impl SortKey<'_> {
    fn kind(&self) -> &'static str {
        match self {
            SortKey::Number(_) => "number",
            SortKey::Text(_) => "string",
            SortKey::Bool(_) => "boolean",
        }
    }

    /// Only called on keys already checked to share one kind.
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Bool(a), SortKey::Bool(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// Sort `data`, optionally by the field or mapping entry named `key`.
///
/// The sort is stable and returns a new vector; `data` is not modified.
///
/// # Errors
///
/// - [`CollError::SortKeyRequired`] when a mapping element is sorted without a key
/// - [`CollError::SortKeyNotFound`] when an element lacks `key`
/// - [`CollError::IncomparableTypes`] when extracted keys mix kinds, or a key
///   is null, a sequence or a mapping
///
/// # Example
/// ```
/// use coll_core::{sort, Value};
///
/// let data = Value::from_json("[3.14, 3.0, 4.0]").unwrap();
/// let sorted = sort(None, data.as_sequence().unwrap()).unwrap();
/// assert_eq!(Value::from(sorted).to_string(), "[3,3.14,4]");
/// ```
pub fn sort(key: Option<&str>, data: &[Value]) -> Result<Vec<Value>> {
    let mut keyed = Vec::with_capacity(data.len());
    for (index, element) in data.iter().enumerate() {
        keyed.push((extract_key(key, index, element)?, element));
    }

    if let Some((first, _)) = keyed.first() {
        let expected = first.kind();
        if let Some(index) = keyed
            .iter()
            .position(|(sort_key, _)| sort_key.kind() != expected)
        {
            return Err(CollError::IncomparableTypes {
                index,
                expected,
                found: keyed[index].0.kind(),
            });
        }
    }

    // `sort_by` is stable: equal keys keep their original relative order.
    keyed.sort_by(|(a, _), (b, _)| a.compare(b));
    tracing::trace!(len = keyed.len(), key, "sorted sequence");

    Ok(keyed.into_iter().map(|(_, element)| element.clone()).collect())
}

fn extract_key<'a>(key: Option<&str>, index: usize, element: &'a Value) -> Result<SortKey<'a>> {
    let not_found = |name: &str| CollError::SortKeyNotFound {
        key: name.to_string(),
        index,
    };

    match (element, key) {
        (Value::Mapping(map), Some(name)) => {
            let entry = map.get(name).ok_or_else(|| not_found(name))?;
            scalar_key(entry, index)
        }
        (Value::Mapping(_), None) => Err(CollError::SortKeyRequired { index }),
        (Value::Object(record), Some(name)) => {
            let field = record.field(name).ok_or_else(|| not_found(name))?;
            let sort_key = scalar_key(&field, index)?;
            Ok(into_owned_key(sort_key))
        }
        (Value::Object(record), None) => Ok(SortKey::Text(Cow::Owned(record.canonical()))),
        (_, Some(name)) => Err(not_found(name)),
        (scalar, None) => scalar_key(scalar, index),
    }
}

/// Key for a value compared as itself.
fn scalar_key(value: &Value, index: usize) -> Result<SortKey<'_>> {
    match value {
        Value::Number(n) => Ok(SortKey::Number(*n)),
        Value::String(s) => Ok(SortKey::Text(Cow::Borrowed(s))),
        Value::Bool(b) => Ok(SortKey::Bool(*b)),
        Value::Object(record) => Ok(SortKey::Text(Cow::Owned(record.canonical()))),
        other @ (Value::Null | Value::Sequence(_) | Value::Mapping(_)) => {
            Err(CollError::IncomparableTypes {
                index,
                expected: "scalar",
                found: other.kind_name(),
            })
        }
    }
}

/// Detach a key built from a temporary value (an object field).
fn into_owned_key<'a>(key: SortKey<'_>) -> SortKey<'a> {
    match key {
        SortKey::Number(n) => SortKey::Number(n),
        SortKey::Text(text) => SortKey::Text(Cow::Owned(text.into_owned())),
        SortKey::Bool(b) => SortKey::Bool(b),
    }
}
