//! # coll-core
//!
//! Collection operations over dynamic, decoded JSON/YAML data, as used by
//! text templates: deep merge, type-aware sort, flatten, pick/omit and path
//! queries.
//!
//! Every operation works on [`Value`], a closed recursive value model with a
//! single widened number type (so `3 == 3.0`) and sorted mapping keys.
//!
//! ## Quick start
//!
//! ```rust
//! use coll_core::{merge, query, Value};
//!
//! let defaults = Value::from_json(r#"{"values":{"one":1,"two":2,"four":{"a":"a","b":"b"}}}"#).unwrap();
//! let config = Value::from_json(r#"{"values":{"one":"uno","four":{"a":"eh?"}}}"#).unwrap();
//!
//! let merged = merge(config, [&defaults]).unwrap();
//! assert_eq!(query(".values.four.b", &merged).unwrap(), Value::from("b"));
//! assert_eq!(query(".values..a", &merged).unwrap(), Value::from("eh?"));
//! ```
//!
//! ## Modules
//!
//! - [`value`]: `Value`, `Number`, `Mapping` and the `Record` trait for opaque objects
//! - [`merge`]: deep merge with first-declared-wins precedence
//! - [`sort`]: stable sort, optionally by key
//! - [`flatten`]: collapse nested sequences to a depth
//! - [`select`]: `pick` / `omit` top-level mapping keys
//! - [`query`]: compiled JSONPath-subset queries
//! - [`collection`]: `dict`, `has`, `keys`, `values`, `append`, `prepend`, `reverse`, `uniq`
//! - [`error`]: `CollError`

pub mod collection;
pub mod error;
pub mod flatten;
pub mod merge;
pub mod query;
pub mod select;
pub mod sort;
pub mod value;

pub use collection::{append, dict, has, keys, prepend, reverse, uniq, values};
pub use error::CollError;
pub use flatten::{flatten, flatten_all, UNBOUNDED};
pub use merge::{merge, merge_into};
pub use query::{query, Path};
pub use select::{omit, pick};
pub use sort::sort;
pub use value::{Mapping, Number, Record, Shape, Value};
