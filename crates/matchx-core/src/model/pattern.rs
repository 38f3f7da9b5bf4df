//! Expected-value trees.
//!
//! A [`Pattern`] mirrors the shape of a JSON value, except that any node may
//! be a [`Matcher`] instead of a literal.

use crate::errors::Result;
use crate::matchers::{matcher_for, Capture, Matcher};
use crate::result::MatchResult;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// An expected value, possibly embedding matchers at any depth
#[derive(Clone, Debug)]
pub enum Pattern {
    /// A null, boolean, number or string literal
    Scalar(Value),
    /// An array whose elements are patterns
    Array(Vec<Pattern>),
    /// An object whose values are patterns
    Object(BTreeMap<String, Pattern>),
    /// A matcher node
    Matcher(Arc<dyn Matcher>),
}

impl Pattern {
    /// Wrap a matcher as a pattern node
    pub fn matcher(matcher: impl Matcher + 'static) -> Self {
        Pattern::Matcher(Arc::new(matcher))
    }

    /// The matcher that judges values against this pattern. A matcher node
    /// is used as-is; anything else is matched exactly.
    pub fn into_matcher(self) -> Arc<dyn Matcher> {
        matcher_for("exact", self, false)
    }

    /// Test `actual` against this pattern
    ///
    /// # Errors
    ///
    /// - `UndecodableJson` if a `serializedJson` node cannot decode its input
    pub fn test<'a>(&self, actual: &'a Value) -> Result<MatchResult<'a>> {
        self.clone().into_matcher().test(actual)
    }
}

impl From<Value> for Pattern {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => Pattern::Array(items.into_iter().map(Pattern::from).collect()),
            Value::Object(entries) => Pattern::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Pattern::from(v)))
                    .collect(),
            ),
            scalar => Pattern::Scalar(scalar),
        }
    }
}

impl From<&str> for Pattern {
    fn from(value: &str) -> Self {
        Pattern::Scalar(Value::from(value))
    }
}

impl From<String> for Pattern {
    fn from(value: String) -> Self {
        Pattern::Scalar(Value::from(value))
    }
}

impl From<bool> for Pattern {
    fn from(value: bool) -> Self {
        Pattern::Scalar(Value::from(value))
    }
}

impl From<i32> for Pattern {
    fn from(value: i32) -> Self {
        Pattern::Scalar(Value::from(value))
    }
}

impl From<i64> for Pattern {
    fn from(value: i64) -> Self {
        Pattern::Scalar(Value::from(value))
    }
}

impl From<u64> for Pattern {
    fn from(value: u64) -> Self {
        Pattern::Scalar(Value::from(value))
    }
}

impl From<f64> for Pattern {
    fn from(value: f64) -> Self {
        Pattern::Scalar(Value::from(value))
    }
}

impl From<Vec<Pattern>> for Pattern {
    fn from(items: Vec<Pattern>) -> Self {
        Pattern::Array(items)
    }
}

impl From<BTreeMap<String, Pattern>> for Pattern {
    fn from(entries: BTreeMap<String, Pattern>) -> Self {
        Pattern::Object(entries)
    }
}

impl From<Capture> for Pattern {
    fn from(capture: Capture) -> Self {
        Pattern::matcher(capture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchers::Match;
    use serde_json::json;

    #[test]
    fn test_from_value_splits_containers() {
        let pattern = Pattern::from(json!({"a": [1, "x"], "b": null}));
        let Pattern::Object(entries) = pattern else {
            panic!("expected object pattern");
        };
        assert!(matches!(entries["a"], Pattern::Array(ref items) if items.len() == 2));
        assert!(matches!(entries["b"], Pattern::Scalar(Value::Null)));
    }

    #[test]
    fn test_nested_matchers_are_dispatched() {
        let nested = Pattern::Array(vec![Pattern::from(1), Match::any_value()]);
        assert!(nested.test(&json!([1, "x"])).unwrap().is_success());

        let actual = json!([1, null]);
        let r = nested.test(&actual).unwrap();
        assert_eq!(r.to_human_strings().len(), 1);
    }
}
