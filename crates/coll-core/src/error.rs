//! Error types for collection engine operations.

use thiserror::Error;

/// Errors that can occur while merging, sorting, querying or building values.
#[derive(Error, Debug)]
pub enum CollError {
    /// `merge` was called with a root that is neither a mapping nor a sequence.
    #[error("cannot merge into a {found}: destination must be a mapping or a sequence")]
    UnsupportedMergeType { found: &'static str },

    /// The sort key is missing on the element at `index`.
    #[error("sort key '{key}' not found on element {index}")]
    SortKeyNotFound { key: String, index: usize },

    /// A sequence of mappings was sorted without naming a key.
    #[error("element {index} is a mapping, a sort key is required")]
    SortKeyRequired { index: usize },

    /// Two elements of a sort sequence cannot be ordered against each other.
    #[error("cannot compare element {index} ({found}) with preceding {expected} elements")]
    IncomparableTypes {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    /// A path query evaluated to nothing.
    #[error("no match for path '{expression}'")]
    NoMatch { expression: String },

    /// A path query could not be parsed.
    /// `position` is the 0-based character offset of the offending input.
    #[error("invalid path expression at position {position}: {message}")]
    InvalidPathExpression { position: usize, message: String },

    /// A `dict` key argument cannot be used as a mapping key.
    #[error("dict key at argument {index} must be a string, number or boolean")]
    InvalidDictKey { index: usize },

    /// JSON text given to `Value::from_json` was malformed, or a value failed to encode.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout coll-core.
pub type Result<T> = std::result::Result<T, CollError>;
