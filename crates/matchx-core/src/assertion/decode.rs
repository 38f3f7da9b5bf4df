//! Wire decoding for assertion requests.
//!
//! Any JSON object in the expected pattern may carry exactly one reserved
//! key naming an operator, whose value is that operator's sub-pattern:
//!
//! | key               | operator             | sub-pattern |
//! |-------------------|----------------------|-------------|
//! | `$ArrayWith`      | `arrayWith`          | array       |
//! | `$ObjectLike`     | `objectLike`         | object      |
//! | `$StringLike`     | `stringLikeRegexp`   | string      |
//! | `$SerializedJson` | `serializedJson`     | any         |

use crate::errors::{MatchError, Result};
use crate::matchers::{Match, Matcher};
use crate::model::value::ValueExt;
use crate::model::Pattern;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

const ARRAY_WITH: &str = "$ArrayWith";
const OBJECT_LIKE: &str = "$ObjectLike";
const STRING_LIKE: &str = "$StringLike";
const SERIALIZED_JSON: &str = "$SerializedJson";

const RESERVED_KEYS: [&str; 4] = [ARRAY_WITH, OBJECT_LIKE, STRING_LIKE, SERIALIZED_JSON];

/// Decode one side of a call. Empty input is missing; input that is not
/// JSON is taken as a plain string.
pub fn decode_call(call: Option<&str>) -> Option<Value> {
    let call = call.filter(|c| !c.is_empty())?;
    Some(serde_json::from_str(call).unwrap_or_else(|_| Value::String(call.to_string())))
}

/// Decode a wire-encoded expected value into a pattern
///
/// # Errors
///
/// - `InvalidWireEncoding` if an object mixes a reserved key with other
///   keys, or an operator's sub-pattern has the wrong shape
/// - `InvalidRegex` if a `$StringLike` pattern does not compile
pub fn decode_expected(value: Value) -> Result<Pattern> {
    match value {
        Value::Array(items) => Ok(Pattern::Array(decode_items(items)?)),
        Value::Object(fields) => decode_object(fields),
        scalar => Ok(Pattern::Scalar(scalar)),
    }
}

/// The matcher judging the root of an assertion. A decoded operator is
/// used directly; anything else is matched exactly.
pub fn root_matcher(pattern: Pattern) -> Arc<dyn Matcher> {
    pattern.into_matcher()
}

fn decode_items(items: Vec<Value>) -> Result<Vec<Pattern>> {
    items.into_iter().map(decode_expected).collect()
}

fn decode_entry((key, value): (String, Value)) -> Result<(String, Pattern)> {
    Ok((key, decode_expected(value)?))
}

fn decode_object(mut fields: Map<String, Value>) -> Result<Pattern> {
    let reserved: Vec<&str> = RESERVED_KEYS
        .into_iter()
        .filter(|k| fields.contains_key(*k))
        .collect();

    let key = match reserved.as_slice() {
        [] => {
            return Ok(Pattern::Object(
                fields
                    .into_iter()
                    .map(decode_entry)
                    .collect::<Result<BTreeMap<_, _>>>()?,
            ))
        }
        [key] if fields.len() == 1 => *key,
        _ => {
            let keys: Vec<&str> = fields.keys().map(String::as_str).collect();
            return Err(MatchError::InvalidWireEncoding {
                reason: format!(
                    "an operator key must be the only key of its object, found [{}]",
                    keys.join(", ")
                ),
            });
        }
    };

    let Some(inner) = fields.remove(key) else {
        return Err(MatchError::InvalidWireEncoding {
            reason: format!("missing value for {key}"),
        });
    };

    match (key, inner) {
        (ARRAY_WITH, Value::Array(items)) => Match::array_with(decode_items(items)?),
        (OBJECT_LIKE, Value::Object(entries)) => {
            let entries = entries
                .into_iter()
                .map(decode_entry)
                .collect::<Result<Vec<_>>>()?;
            Ok(Match::object_like(entries))
        }
        (STRING_LIKE, Value::String(regex)) => Match::string_like_regexp(&regex),
        (SERIALIZED_JSON, inner) => Ok(Match::serialized_json(decode_expected(inner)?)),
        (key, other) => Err(MatchError::InvalidWireEncoding {
            reason: format!(
                "{key} expects {} but found {}",
                expected_shape(key),
                other.type_name()
            ),
        }),
    }
}

fn expected_shape(key: &str) -> &'static str {
    match key {
        ARRAY_WITH => "an array",
        OBJECT_LIKE => "an object",
        STRING_LIKE => "a string",
        _ => "a value",
    }
}
