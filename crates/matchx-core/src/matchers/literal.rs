use super::{ArrayMatch, Matcher, ObjectMatch};
use crate::errors::{MatchError, Result};
use crate::model::value::{display_plain, type_name_of, ValueExt};
use crate::model::Pattern;
use crate::result::{Failure, MatchResult};
use serde_json::Value;
use std::collections::BTreeMap;

/// Deep equality against a plain pattern.
///
/// Arrays are matched element by element in order and objects key by key;
/// matchers nested inside them are used as they are.
#[derive(Debug)]
pub struct LiteralMatch {
    name: String,
    kind: LiteralKind,
}

#[derive(Debug)]
enum LiteralKind {
    Scalar(Value),
    Array(ArrayMatch),
    Object(ObjectMatch),
}

impl LiteralMatch {
    /// Build a literal matcher.
    ///
    /// `partial_objects` lets object literals at any depth ignore extra keys.
    ///
    /// # Errors
    ///
    /// - `NestedMatcherInLiteral` if `pattern` is itself a matcher
    pub fn new(name: impl Into<String>, pattern: Pattern, partial_objects: bool) -> Result<Self> {
        let name = name.into();
        match pattern {
            Pattern::Matcher(matcher) => Err(MatchError::NestedMatcherInLiteral {
                matcher: matcher.name().to_string(),
            }),
            Pattern::Scalar(value) => Ok(Self::scalar(name, value)),
            Pattern::Array(items) => Ok(Self::array(name, items, partial_objects)),
            Pattern::Object(entries) => Ok(Self::object(name, entries, partial_objects)),
        }
    }

    pub(crate) fn scalar(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            kind: LiteralKind::Scalar(value),
        }
    }

    pub(crate) fn array(name: impl Into<String>, items: Vec<Pattern>, partial_objects: bool) -> Self {
        let name = name.into();
        let inner = ArrayMatch::full(name.clone(), items, partial_objects);
        Self {
            name,
            kind: LiteralKind::Array(inner),
        }
    }

    pub(crate) fn object(
        name: impl Into<String>,
        entries: BTreeMap<String, Pattern>,
        partial_objects: bool,
    ) -> Self {
        let name = name.into();
        let inner = ObjectMatch::new(name.clone(), entries, partial_objects);
        Self {
            name,
            kind: LiteralKind::Object(inner),
        }
    }
}

impl Matcher for LiteralMatch {
    fn name(&self) -> &str {
        &self.name
    }

    fn test_value<'a>(&self, actual: Option<&'a Value>) -> Result<MatchResult<'a>> {
        let expected = match &self.kind {
            LiteralKind::Array(inner) => return inner.test_value(actual),
            LiteralKind::Object(inner) => return inner.test_value(actual),
            LiteralKind::Scalar(expected) => expected,
        };

        let result = MatchResult::new(actual);
        let actual_type = type_name_of(actual);
        if expected.type_name() != actual_type {
            return Ok(result.with_failure(Failure::new(
                &self.name,
                format!(
                    "Expected type {} but received {}",
                    expected.type_name(),
                    actual_type
                ),
            )));
        }

        match actual {
            Some(value) if value.strict_eq(expected) => Ok(result),
            _ => Ok(result.with_failure(Failure::new(
                &self.name,
                format!(
                    "Expected {} but received {}",
                    display_plain(Some(expected)),
                    display_plain(actual)
                ),
            ))),
        }
    }
}
