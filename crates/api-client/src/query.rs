//! Query string encoding for nested request parameters.
//!
//! Nested objects are flattened with dot notation (`{a: {b: 1}}` becomes
//! `a.b=1`). Neither keys nor values are percent-encoded.
//!
//! Array values are emitted as their bare comma-joined text with no `key=`
//! prefix under [`ArrayFormat::Passthrough`], which is the default because
//! existing backends were written against that output. [`ArrayFormat::Repeat`]
//! is the corrected form and has to be opted into.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Query parameters, kept in insertion order.
pub type Params = Map<String, Value>;

/// How array values are written into the query string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayFormat {
    /// `{tags: ["a", "b"]}` encodes as `a,b`.
    #[default]
    Passthrough,
    /// `{tags: ["a", "b"]}` encodes as `tags=a&tags=b`.
    Repeat,
}

/// Encodes `params` into a query fragment without the leading `?`.
pub fn encode(params: &Params, format: ArrayFormat) -> String {
    encode_nested(params, "", format)
}

fn encode_nested(params: &Params, parent_key: &str, format: ArrayFormat) -> String {
    params
        .iter()
        .map(|(key, value)| {
            let full_key = if parent_key.is_empty() {
                key.clone()
            } else {
                format!("{parent_key}.{key}")
            };

            match value {
                Value::Array(items) => match format {
                    ArrayFormat::Passthrough => join_array(items),
                    ArrayFormat::Repeat => items
                        .iter()
                        .map(|item| format!("{full_key}={}", element_text(item)))
                        .collect::<Vec<_>>()
                        .join("&"),
                },
                Value::Object(nested) => encode_nested(nested, &full_key, format),
                primitive => format!("{full_key}={}", primitive_text(primitive)),
            }
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Largest integer an `f64` holds exactly (2^53).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

fn primitive_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            // Whole-valued floats print without a fraction: 10.0 -> "10"
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

/// Text of an array element as produced by a comma join: nulls are empty,
/// nested arrays flatten, and objects collapse to a fixed placeholder.
fn element_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Array(items) => join_array(items),
        Value::Object(_) => "[object Object]".to_string(),
        primitive => primitive_text(primitive),
    }
}

fn join_array(items: &[Value]) -> String {
    items.iter().map(element_text).collect::<Vec<_>>().join(",")
}
