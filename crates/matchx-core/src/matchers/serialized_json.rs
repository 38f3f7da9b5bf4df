use super::{matcher_for, Matcher};
use crate::errors::{MatchError, Result};
use crate::model::value::type_name_of;
use crate::model::Pattern;
use crate::result::{Failure, MatchResult};
use serde_json::error::Category;
use serde_json::Value;
use std::sync::Arc;

/// Matches a string holding encoded JSON against a pattern for the decoded
/// value.
///
/// The returned result judges the decoded value, not the string, and is
/// marked as transformed so renderers can show both.
#[derive(Debug)]
pub struct SerializedJsonMatch {
    name: String,
    inner: Arc<dyn Matcher>,
}

impl SerializedJsonMatch {
    pub fn new(name: impl Into<String>, pattern: Pattern) -> Self {
        let name = name.into();
        let inner = matcher_for(&name, pattern, false);
        Self { name, inner }
    }
}

impl Matcher for SerializedJsonMatch {
    fn name(&self) -> &str {
        &self.name
    }

    /// # Errors
    ///
    /// - `UndecodableJson` if decoding fails for a reason other than
    ///   malformed input
    fn test_value<'a>(&self, actual: Option<&'a Value>) -> Result<MatchResult<'a>> {
        let Some(Value::String(encoded)) = actual else {
            return Ok(MatchResult::new(actual).with_failure(Failure::new(
                &self.name,
                format!(
                    "Expected JSON as a string but found {}",
                    type_name_of(actual)
                ),
            )));
        };

        let decoded: Value = match serde_json::from_str(encoded) {
            Ok(decoded) => decoded,
            Err(e) if matches!(e.classify(), Category::Syntax | Category::Eof) => {
                return Ok(MatchResult::new(actual).with_failure(Failure::new(
                    &self.name,
                    format!("Invalid JSON string: {encoded}"),
                )));
            }
            Err(e) => {
                return Err(MatchError::UndecodableJson {
                    reason: e.to_string(),
                })
            }
        };

        let mut result = self.inner.test(&decoded)?.into_transformed();
        if result.has_failed() {
            result.record_failure(Failure::new(&self.name, "Encoded JSON value does not match"));
        }
        Ok(result)
    }
}
