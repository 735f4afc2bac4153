//! WASM bindings for coll-core.
//!
//! Every export takes its documents as JSON strings and returns compact JSON,
//! so JavaScript callers pass `JSON.stringify(value)` and `JSON.parse` the
//! result. Engine and parse errors are thrown as JS errors.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p coll-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/coll_wasm.wasm
//! ```

use coll_core::{CollError, Value};
use wasm_bindgen::prelude::*;

fn to_js(e: CollError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse(json: &str) -> Result<Value, JsValue> {
    Value::from_json(json).map_err(to_js)
}

fn render(value: &Value) -> Result<String, JsValue> {
    value.to_json().map_err(to_js)
}

fn parse_sequence(json: &str) -> Result<Vec<Value>, JsValue> {
    match parse(json)? {
        Value::Sequence(items) => Ok(items),
        other => Err(JsValue::from_str(&format!(
            "expected an array, got {}",
            other.kind_name()
        ))),
    }
}

fn parse_mapping(json: &str) -> Result<coll_core::Mapping, JsValue> {
    match parse(json)? {
        Value::Mapping(map) => Ok(map),
        other => Err(JsValue::from_str(&format!(
            "expected an object, got {}",
            other.kind_name()
        ))),
    }
}

/// Merge a JSON array of default documents underneath `overrides`.
#[wasm_bindgen]
pub fn merge(overrides: &str, sources: &str) -> Result<String, JsValue> {
    let dest = parse(overrides)?;
    let sources = parse_sequence(sources)?;
    let merged = coll_core::merge(dest, &sources).map_err(to_js)?;
    render(&merged)
}

/// Sort a JSON array, optionally by `key`.
#[wasm_bindgen]
pub fn sort(key: Option<String>, data: &str) -> Result<String, JsValue> {
    let items = parse_sequence(data)?;
    let sorted = coll_core::sort(key.as_deref(), &items).map_err(to_js)?;
    render(&Value::from(sorted))
}

/// Flatten a JSON array; a negative depth flattens completely.
#[wasm_bindgen]
pub fn flatten(depth: i32, data: &str) -> Result<String, JsValue> {
    let items = parse_sequence(data)?;
    render(&Value::from(coll_core::flatten(i64::from(depth), &items)))
}

/// Keep only `keys` of a JSON object.
#[wasm_bindgen]
pub fn pick(keys: Vec<String>, data: &str) -> Result<String, JsValue> {
    let map = parse_mapping(data)?;
    render(&Value::from(coll_core::pick(&keys, &map)))
}

/// Drop `keys` from a JSON object.
#[wasm_bindgen]
pub fn omit(keys: Vec<String>, data: &str) -> Result<String, JsValue> {
    let map = parse_mapping(data)?;
    render(&Value::from(coll_core::omit(&keys, &map)))
}

/// Evaluate a path expression against a JSON document.
#[wasm_bindgen]
pub fn query(expression: &str, data: &str) -> Result<String, JsValue> {
    let doc = parse(data)?;
    let result = coll_core::query(expression, &doc).map_err(to_js)?;
    render(&result)
}
