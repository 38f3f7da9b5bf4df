//! Helpers over `serde_json::Value`.
//!
//! A value that is not there at all (a missing object key, or nothing
//! passed to a matcher) is modelled as `None` and reported as `undefined`.

use serde_json::{Number, Value};

/// Type and comparison helpers used by matchers and the renderer
pub trait ValueExt {
    /// Name of the JSON type, as used in failure messages
    fn type_name(&self) -> &'static str;

    /// True for numbers, booleans and strings
    fn is_primitive(&self) -> bool;

    /// Strict equality, with numbers compared by numeric value
    fn strict_eq(&self, other: &Value) -> bool;
}

impl ValueExt for Value {
    fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    fn is_primitive(&self) -> bool {
        matches!(self, Value::Bool(_) | Value::Number(_) | Value::String(_))
    }

    fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => numbers_equal(a, b),
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.strict_eq(y))
            }
            (Value::Object(a), Value::Object(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(k, v)| b.get(k).is_some_and(|other| v.strict_eq(other)))
            }
            (a, b) => a == b,
        }
    }
}

/// Type name of a possibly-missing value
pub fn type_name_of(value: Option<&Value>) -> &'static str {
    value.map_or("undefined", ValueExt::type_name)
}

/// Plain-text rendering used inside failure messages: strings appear
/// without quotes, everything else as compact JSON.
pub fn display_plain(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Text form used when a non-string is tested as a string. Arrays join
/// their elements with commas (null elements become empty), objects become
/// `[object Object]`, and whole floats drop their fraction.
pub fn coerce_to_string(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::Null) => "null".to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) if n.is_f64() => f.to_string(),
            _ => n.to_string(),
        },
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => coerce_to_string(Some(other)),
            })
            .collect::<Vec<_>>()
            .join(","),
        Some(Value::Object(_)) => "[object Object]".to_string(),
    }
}

/// JSON rendering of a possibly-missing value
pub fn jsonify(value: Option<&Value>) -> String {
    value.map_or_else(|| "undefined".to_string(), Value::to_string)
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}
