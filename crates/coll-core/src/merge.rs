//! Deep merge of value trees, with earlier trees taking precedence.
//!
//! The destination ("overrides") is filled in from each source in turn. A
//! key already set in the destination, or by an earlier source, is never
//! replaced:
//!
//! - mapping vs mapping: merge recursively
//! - sequence vs sequence: the destination sequence is kept verbatim
//! - key absent (or `null`) in the destination: the source value is copied in
//! - any other shape mismatch: the destination wins, the source is dropped
//!
//! # Example
//! ```
//! use coll_core::{merge, Value};
//!
//! let config = Value::from_json(r#"{"values":{"one":"uno","three":[5,6,7]}}"#).unwrap();
//! let defaults = Value::from_json(r#"{"values":{"one":1,"two":2,"three":[4]}}"#).unwrap();
//!
//! let merged = merge(config, [&defaults]).unwrap();
//! assert_eq!(merged.to_json().unwrap(), r#"{"values":{"one":"uno","three":[5,6,7],"two":2}}"#);
//! ```

use crate::error::{CollError, Result};
use crate::value::{Mapping, Value};

/// Merge `sources` underneath `overrides` and return the merged root.
///
/// `overrides` is taken by value and filled in place; the returned value is
/// that same root. Clone it first to keep the original tree.
///
/// # Errors
///
/// Returns [`CollError::UnsupportedMergeType`] when `overrides` is neither a
/// mapping nor a sequence.
pub fn merge<'a, I>(mut overrides: Value, sources: I) -> Result<Value>
where
    I: IntoIterator<Item = &'a Value>,
{
    merge_into(&mut overrides, sources)?;
    Ok(overrides)
}

/// In-place form of [`merge`].
///
/// # Errors
///
/// Returns [`CollError::UnsupportedMergeType`] when `dest` is neither a
/// mapping nor a sequence. `dest` is left untouched in that case.
pub fn merge_into<'a, I>(dest: &mut Value, sources: I) -> Result<()>
where
    I: IntoIterator<Item = &'a Value>,
{
    match dest {
        Value::Mapping(map) => {
            for (index, source) in sources.into_iter().enumerate() {
                match source {
                    Value::Mapping(src) => merge_mapping(map, src),
                    other => {
                        tracing::debug!(
                            index,
                            found = other.kind_name(),
                            "skipping merge source whose root is not a mapping"
                        );
                    }
                }
            }
            Ok(())
        }
        Value::Sequence(_) => {
            for (index, source) in sources.into_iter().enumerate() {
                match source {
                    Value::Sequence(_) => {}
                    other => {
                        tracing::debug!(
                            index,
                            found = other.kind_name(),
                            "skipping merge source whose root is not a sequence"
                        );
                    }
                }
            }
            Ok(())
        }
        other => Err(CollError::UnsupportedMergeType {
            found: other.kind_name(),
        }),
    }
}

/// Fill `dest` with every entry of `src` it does not already define.
fn merge_mapping(dest: &mut Mapping, src: &Mapping) {
    for (key, value) in src {
        match dest.get_mut(key) {
            Some(existing) => merge_entry(key, existing, value),
            None => {
                dest.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Reconcile one key present on both sides. The destination always wins
/// except when it holds `null`, which counts as unset.
fn merge_entry(key: &str, existing: &mut Value, incoming: &Value) {
    if existing.is_null() {
        *existing = incoming.clone();
        return;
    }
    match (existing, incoming) {
        (Value::Mapping(dest), Value::Mapping(src)) => merge_mapping(dest, src),
        (Value::Sequence(_), Value::Sequence(_)) => {}
        (existing, incoming) => {
            if existing.shape() != incoming.shape() {
                tracing::trace!(
                    key,
                    kept = existing.kind_name(),
                    dropped = incoming.kind_name(),
                    "merge shape conflict"
                );
            }
        }
    }
}
