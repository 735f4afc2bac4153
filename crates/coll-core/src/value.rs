//! Dynamic value model shared by every engine operation.
//!
//! Decoded JSON/YAML documents are converted into [`Value`], a closed tagged
//! variant, so that merge, sort, flatten, pick/omit and query can match on
//! shapes exhaustively instead of inspecting types at runtime.
//!
//! # Normalization rules
//!
//! - **Numeric widening**: every integer and float becomes a [`Number`], a
//!   finite `f64`. `3` and `3.0` are the same value and `3 < 3.14`.
//! - **Key ordering**: a [`Mapping`] keeps its keys sorted, so rendering is
//!   deterministic (alphabetic key order) regardless of decode order.
//! - **Opaque objects**: values that are neither data nor containers (e.g. a
//!   parsed URL) are carried as [`Record`] trait objects with named fields and
//!   a canonical string form.

use crate::error::Result;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// String-keyed mapping with unique, sorted keys.
pub type Mapping = BTreeMap<String, Value>;

/// Largest magnitude at which every integer is exactly representable in `f64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Widened numeric scalar.
///
/// Always finite; `-0.0` is normalized to `0.0` so that equality, ordering
/// and hashing agree.
#[derive(Debug, Clone, Copy)]
pub struct Number(f64);

impl Number {
    /// Build a number from a float. Returns `None` for NaN and infinities.
    pub fn from_f64(f: f64) -> Option<Self> {
        if !f.is_finite() {
            return None;
        }
        Some(Self(if f == 0.0 { 0.0 } else { f }))
    }

    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// The exact integer value, if this number is integral and within the
    /// range where `f64` represents every integer (±2^53).
    pub fn as_i64(self) -> Option<i64> {
        if self.0.fract() == 0.0 && self.0.abs() <= MAX_EXACT_INTEGER {
            Some(self.0 as i64)
        } else {
            None
        }
    }

    pub fn is_integral(self) -> bool {
        self.0.fract() == 0.0
    }
}

macro_rules! number_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(n: $t) -> Self {
                    Number(n as f64)
                }
            }
        )*
    };
}

number_from_int!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

/// Integral values render without a decimal point: `3`, not `3.0`.
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_i64() {
            Some(i) => write!(f, "{}", i),
            None => write!(f, "{}", self.0),
        }
    }
}

/// An opaque comparable object carried inside a [`Value`].
///
/// Implementors expose named fields (looked up case-sensitively, e.g. a URL's
/// `Scheme`) and a canonical string form used for ordering, equality and
/// serialization.
pub trait Record: fmt::Debug + Send + Sync {
    /// Name of the concrete type, e.g. `"url"`.
    fn type_name(&self) -> &str;

    /// Value of the field called `name`, if the record has one.
    fn field(&self, name: &str) -> Option<Value>;

    /// Intrinsic string form of the record.
    fn canonical(&self) -> String;
}

/// Coarse kind of a value, independent of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Scalar,
    Sequence,
    Mapping,
}

/// Universal recursive data node.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Object(Arc<dyn Record>),
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

impl Value {
    /// Wrap a [`Record`] implementation as an object scalar.
    pub fn object<R: Record + 'static>(record: R) -> Self {
        Value::Object(Arc::new(record))
    }

    /// Parse a JSON document into a value.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render the value as compact JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn shape(&self) -> Shape {
        match self {
            Value::Sequence(_) => Shape::Sequence,
            Value::Mapping(_) => Shape::Mapping,
            Value::Null
            | Value::Bool(_)
            | Value::Number(_)
            | Value::String(_)
            | Value::Object(_) => Shape::Scalar,
        }
    }

    /// Short human-readable kind name, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Object(_) => "object",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Mapping entry lookup. Returns `None` for non-mappings.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_mapping().and_then(|map| map.get(key))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => {
                a.type_name() == b.type_name() && a.canonical() == b.canonical()
            }
            (Value::Sequence(a), Value::Sequence(b)) => a == b,
            (Value::Mapping(a), Value::Mapping(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n.into())
    }
}

/// Non-finite floats become [`Value::Null`], matching `serde_json`.
impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Number::from_f64(f).map_or(Value::Null, Value::Number)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Value::Mapping(map)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n
                .as_f64()
                .and_then(Number::from_f64)
                .map_or(Value::Null, Value::Number),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Mapping(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => serde_json::Value::Number(i.into()),
                None => serde_json::Number::from_f64(n.as_f64())
                    .map_or(serde_json::Value::Null, serde_json::Value::Number),
            },
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Object(record) => serde_json::Value::String(record.canonical()),
            Value::Sequence(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
            Value::Mapping(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), serde_json::Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(n.as_f64()),
            },
            Value::String(s) => serializer.serialize_str(s),
            Value::Object(record) => serializer.serialize_str(&record.canonical()),
            Value::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Mapping(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}

/// Decoding goes through `serde_json::Value`, so any self-describing format
/// (JSON, YAML, ...) produces the same shapes.
impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

/// Compact JSON rendering.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
