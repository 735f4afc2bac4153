//! Collapse nested sequences into their parent sequence.
//!
//! Only sequence-in-sequence nesting is unrolled. Mappings and scalars are
//! copied through unchanged, wherever they sit.

use crate::value::Value;

/// Depth that flattens every level of nesting.
pub const UNBOUNDED: i64 = -1;

/// Flatten `data` by up to `max_depth` levels of nesting.
///
/// - `0` returns a structural copy
/// - `N > 0` unrolls sequences nested up to `N` levels deep
/// - any negative depth (see [`UNBOUNDED`]) unrolls everything, in pre-order
///
/// # Example
/// ```
/// use coll_core::{flatten, Value};
///
/// let data = Value::from_json("[[1,2],[],[[3,4],[[[5],6],7]]]").unwrap();
/// let seq = data.as_sequence().unwrap();
/// assert_eq!(Value::from(flatten(1, seq)).to_string(), "[1,2,[3,4],[[[5],6],7]]");
/// assert_eq!(Value::from(flatten(-1, seq)).to_string(), "[1,2,3,4,5,6,7]");
/// ```
pub fn flatten(max_depth: i64, data: &[Value]) -> Vec<Value> {
    let mut out = Vec::with_capacity(data.len());
    flatten_into(max_depth, data, &mut out);
    tracing::trace!(max_depth, before = data.len(), after = out.len(), "flattened sequence");
    out
}

/// Flatten every level of nesting. Same as `flatten(UNBOUNDED, data)`.
pub fn flatten_all(data: &[Value]) -> Vec<Value> {
    flatten(UNBOUNDED, data)
}

fn flatten_into(depth: i64, data: &[Value], out: &mut Vec<Value>) {
    for element in data {
        match element {
            Value::Sequence(inner) if depth != 0 => {
                // Negative depths never count down.
                let next = if depth < 0 { depth } else { depth - 1 };
                flatten_into(next, inner, out)
            }
            other => out.push(other.clone()),
        }
    }
}
