//! Matchers with no sub-pattern.

use super::Matcher;
use crate::errors::{MatchError, Result};
use crate::model::value::{coerce_to_string, display_plain, type_name_of};
use crate::result::{Failure, MatchResult};
use regex::{Regex, RegexBuilder};
use serde_json::Value;

/// Passes only when the value is missing
#[derive(Debug)]
pub struct AbsentMatch {
    name: String,
}

impl AbsentMatch {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Matcher for AbsentMatch {
    fn name(&self) -> &str {
        &self.name
    }

    fn test_value<'a>(&self, actual: Option<&'a Value>) -> Result<MatchResult<'a>> {
        let result = MatchResult::new(actual);
        match actual {
            None => Ok(result),
            Some(_) => Ok(result.with_failure(Failure::new(
                &self.name,
                format!(
                    "Received {}, but key should be absent",
                    display_plain(actual)
                ),
            ))),
        }
    }

    fn usable_in_subsequence(&self) -> bool {
        false
    }

    fn is_absent(&self) -> bool {
        true
    }
}

/// Passes for any present, non-null value
#[derive(Debug)]
pub struct AnyMatch {
    name: String,
}

impl AnyMatch {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Matcher for AnyMatch {
    fn name(&self) -> &str {
        &self.name
    }

    fn test_value<'a>(&self, actual: Option<&'a Value>) -> Result<MatchResult<'a>> {
        let result = MatchResult::new(actual);
        match actual {
            None | Some(Value::Null) => Ok(result.with_failure(Failure::new(
                &self.name,
                "Expected a value but found none",
            ))),
            Some(_) => Ok(result),
        }
    }

    fn usable_in_subsequence(&self) -> bool {
        false
    }
}

/// A string matching a multi-line regular expression.
///
/// The type check and the regex check are independent; a non-string value
/// is tested against its string coercion and may fail both.
#[derive(Debug)]
pub struct StringLikeRegexpMatch {
    name: String,
    pattern: String,
    regex: Regex,
}

impl StringLikeRegexpMatch {
    /// # Errors
    ///
    /// - `InvalidRegex` if `pattern` does not compile
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .multi_line(true)
            .build()
            .map_err(|e| MatchError::InvalidRegex {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            name: name.into(),
            pattern: pattern.to_string(),
            regex,
        })
    }
}

impl Matcher for StringLikeRegexpMatch {
    fn name(&self) -> &str {
        &self.name
    }

    fn test_value<'a>(&self, actual: Option<&'a Value>) -> Result<MatchResult<'a>> {
        let mut result = MatchResult::new(actual);
        if !matches!(actual, Some(Value::String(_))) {
            result.record_failure(Failure::new(
                &self.name,
                format!("Expected a string, but got '{}'", type_name_of(actual)),
            ));
        }

        let text = coerce_to_string(actual);
        if !self.regex.is_match(&text) {
            result.record_failure(Failure::new(
                &self.name,
                format!("String '{}' did not match pattern '{}'", text, self.pattern),
            ));
        }
        Ok(result)
    }
}
