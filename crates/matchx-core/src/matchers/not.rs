use super::{matcher_for, Matcher};
use crate::errors::Result;
use crate::model::value::jsonify;
use crate::model::Pattern;
use crate::result::{Failure, MatchResult};
use serde_json::Value;
use std::sync::Arc;

/// Inverts a pattern. A failing negation carries a single failure and no
/// nested diagnostics.
#[derive(Debug)]
pub struct NotMatch {
    name: String,
    inner: Arc<dyn Matcher>,
}

impl NotMatch {
    pub fn new(name: impl Into<String>, pattern: Pattern) -> Self {
        let name = name.into();
        let inner = matcher_for(&name, pattern, false);
        Self { name, inner }
    }
}

impl Matcher for NotMatch {
    fn name(&self) -> &str {
        &self.name
    }

    fn test_value<'a>(&self, actual: Option<&'a Value>) -> Result<MatchResult<'a>> {
        let inner = self.inner.test_value(actual)?;
        let result = MatchResult::new(actual);
        if inner.has_failed() {
            return Ok(result);
        }

        let shown = match actual {
            Some(value) => serde_json::to_string_pretty(value)?,
            None => jsonify(None),
        };
        Ok(result.with_failure(Failure::new(
            &self.name,
            format!("Found unexpected match: {shown}"),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchers::Match;
    use serde_json::json;

    #[test]
    fn test_negates_literal() {
        let m = NotMatch::new("not", json!({"a": 1}).into());
        assert!(m.test(&json!({"a": 2})).unwrap().is_success());

        let actual = json!({"a": 1});
        let r = m.test(&actual).unwrap();
        assert_eq!(r.fail_count(), 1);
        assert_eq!(
            r.failures()[0].message,
            "Found unexpected match: {\n  \"a\": 1\n}"
        );
    }

    #[test]
    fn test_negates_matcher() {
        let m = NotMatch::new("not", Match::absent());
        assert!(m.test_value(None).unwrap().has_failed());
        assert!(m.test(&json!(1)).unwrap().is_success());
    }
}
