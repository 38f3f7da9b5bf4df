//! Match outcomes.
//!
//! A [`MatchResult`] is built fresh for every `test()` call. Children are
//! folded into their parent with [`MatchResult::compose`], so a finished
//! result mirrors the shape of the value it judged, keeping only the
//! branches that failed.

mod render;

use crate::matchers::Capture;
use indexmap::IndexMap;
use serde_json::Value;
use std::borrow::Cow;
use std::mem;

/// A single recorded mismatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Name of the matcher that recorded the failure
    pub matcher: String,
    /// Path relative to the result the failure was recorded on
    pub path: Vec<String>,
    pub message: String,
    /// Contribution to the result's cost. Zero marks an informational entry.
    pub cost: u32,
}

impl Failure {
    pub fn new(matcher: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            matcher: matcher.into(),
            path: Vec::new(),
            message: message.into(),
            cost: 1,
        }
    }

    pub fn with_path<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.path = path.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }
}

/// Outcome of testing one value against one matcher
#[derive(Debug, Clone)]
pub struct MatchResult<'a> {
    target: Option<Cow<'a, Value>>,
    transformed: bool,
    failures_here: IndexMap<String, Vec<Failure>>,
    inner_match_failures: IndexMap<String, MatchResult<'a>>,
    captures: Vec<(Capture, Vec<Value>)>,
    fail_count: usize,
    fail_cost: u32,
    finalized: bool,
}

impl<'a> MatchResult<'a> {
    /// Start an empty (passing) result judging `target`
    pub fn new(target: Option<&'a Value>) -> Self {
        Self {
            target: target.map(Cow::Borrowed),
            transformed: false,
            failures_here: IndexMap::new(),
            inner_match_failures: IndexMap::new(),
            captures: Vec::new(),
            fail_count: 0,
            fail_cost: 0,
            finalized: false,
        }
    }

    /// Record a failure on this node
    pub fn record_failure(&mut self, failure: Failure) -> &mut Self {
        let key = failure.path.join(".");
        self.fail_count += 1;
        self.fail_cost += failure.cost;
        self.failures_here.entry(key).or_default().push(failure);
        self
    }

    /// Owned variant of [`record_failure`](Self::record_failure)
    pub fn with_failure(mut self, failure: Failure) -> Self {
        self.record_failure(failure);
        self
    }

    /// Fold a child result into this one under `key`.
    ///
    /// The child is kept only if it failed. Its captures always move up.
    pub fn compose(&mut self, key: impl Into<String>, mut inner: MatchResult<'a>) -> &mut Self {
        let captures = mem::take(&mut inner.captures);
        if inner.has_failed() {
            self.fail_count += inner.fail_count;
            self.fail_cost += inner.fail_cost;
            self.inner_match_failures.insert(key.into(), inner);
        }
        for (capture, values) in captures {
            for value in values {
                self.record_capture(&capture, value);
            }
        }
        self
    }

    /// Hold a captured value until [`finished`](Self::finished)
    pub fn record_capture(&mut self, capture: &Capture, value: Value) -> &mut Self {
        match self.captures.iter_mut().find(|(c, _)| c.same_as(capture)) {
            Some((_, values)) => values.push(value),
            None => self.captures.push((capture.clone(), vec![value])),
        }
        self
    }

    /// Finalize the result. On success every held capture value is
    /// committed to its [`Capture`]. Repeat calls do nothing.
    pub fn finished(mut self) -> Self {
        if self.finalized {
            return self;
        }
        if self.fail_count == 0 {
            for (capture, values) in mem::take(&mut self.captures) {
                capture.commit(values);
            }
        }
        self.finalized = true;
        self
    }

    pub fn is_success(&self) -> bool {
        self.fail_count == 0
    }

    pub fn has_failed(&self) -> bool {
        self.fail_count > 0
    }

    /// Number of failures in this subtree, informational ones included
    pub fn fail_count(&self) -> usize {
        self.fail_count
    }

    /// Summed cost of the failures in this subtree
    pub fn fail_cost(&self) -> u32 {
        self.fail_cost
    }

    pub fn is_finished(&self) -> bool {
        self.finalized
    }

    /// The value this result judged
    pub fn target(&self) -> Option<&Value> {
        self.target.as_deref()
    }

    /// The composed child stored under `key`, if that child failed
    pub fn inner(&self, key: &str) -> Option<&MatchResult<'a>> {
        self.inner_match_failures.get(key)
    }

    /// Failures recorded directly on this node under `key`
    pub fn failures_at(&self, key: &str) -> &[Failure] {
        self.failures_here
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// True if this result judged a value derived from the original
    /// rather than the original itself
    pub fn is_transformed(&self) -> bool {
        self.transformed
    }

    /// Detach from the borrowed input, marking the target as transformed
    pub fn into_transformed(self) -> MatchResult<'static> {
        let mut owned = self.into_owned();
        owned.transformed = true;
        owned
    }

    /// Detach this result (and every child) from the borrowed input
    pub fn into_owned(self) -> MatchResult<'static> {
        MatchResult {
            target: self.target.map(|t| Cow::Owned(t.into_owned())),
            transformed: self.transformed,
            failures_here: self.failures_here,
            inner_match_failures: self
                .inner_match_failures
                .into_iter()
                .map(|(k, v)| (k, v.into_owned()))
                .collect(),
            captures: self.captures,
            fail_count: self.fail_count,
            fail_cost: self.fail_cost,
            finalized: self.finalized,
        }
    }

    /// True if `actual` is the very value this result judged
    pub(crate) fn is_target(&self, actual: Option<&Value>) -> bool {
        if self.transformed {
            return false;
        }
        match (&self.target, actual) {
            (None, None) => true,
            (Some(Cow::Borrowed(t)), Some(a)) => std::ptr::eq(*t, a),
            (Some(Cow::Owned(t)), Some(a)) => t == a,
            _ => false,
        }
    }

    /// Every failure in the tree, with paths made absolute
    pub fn failures(&self) -> Vec<Failure> {
        let mut out = Vec::new();
        self.collect_failures(&[], &mut out);
        out
    }

    fn collect_failures(&self, prefix: &[String], out: &mut Vec<Failure>) {
        for failure in self.failures_here.values().flatten() {
            let mut path = prefix.to_vec();
            path.extend(failure.path.iter().cloned());
            out.push(Failure {
                path,
                ..failure.clone()
            });
        }
        for (key, inner) in &self.inner_match_failures {
            let mut path = prefix.to_vec();
            path.push(key.clone());
            inner.collect_failures(&path, out);
        }
    }

    /// One line per failure: `<message> at /<path> (using <matcher> matcher)`
    pub fn to_human_strings(&self) -> Vec<String> {
        self.failures()
            .into_iter()
            .map(|f| {
                let loc = if f.path.is_empty() {
                    String::new()
                } else {
                    format!(" at /{}", f.path.join("/"))
                };
                format!("{}{} (using {} matcher)", f.message, loc, f.matcher)
            })
            .collect()
    }

    /// Annotated rendering of the judged value, or `<match>` when passing
    pub fn render_mismatch(&self) -> String {
        render::render_mismatch(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fail(msg: &str) -> Failure {
        Failure::new("test", msg)
    }

    #[test]
    fn test_new_result_passes() {
        let v = json!(1);
        let r = MatchResult::new(Some(&v));
        assert!(r.is_success());
        assert!(!r.has_failed());
        assert_eq!(r.fail_count(), 0);
        assert_eq!(r.render_mismatch(), "<match>");
    }

    #[test]
    fn test_record_failure_counts_cost() {
        let v = json!(1);
        let mut r = MatchResult::new(Some(&v));
        r.record_failure(fail("a"))
            .record_failure(fail("b").with_cost(0).with_path(["x", "y"]));
        assert_eq!(r.fail_count(), 2);
        assert_eq!(r.fail_cost(), 1);
        assert_eq!(r.failures_at("x.y").len(), 1);
        assert_eq!(r.failures_at("").len(), 1);
    }

    #[test]
    fn test_compose_keeps_only_failed_children() {
        let v = json!([1, 2]);
        let items = v.as_array().unwrap();
        let mut parent = MatchResult::new(Some(&v));
        parent.compose("0", MatchResult::new(Some(&items[0])));
        parent.compose("1", MatchResult::new(Some(&items[1])).with_failure(fail("bad")));

        assert!(parent.inner("0").is_none());
        assert!(parent.inner("1").is_some());
        assert_eq!(parent.fail_count(), 1);
        assert_eq!(parent.fail_cost(), 1);
    }

    #[test]
    fn test_failures_are_reported_with_absolute_paths() {
        let v = json!({"a": {"b": 1}});
        let mut child = MatchResult::new(v.get("a"));
        child.record_failure(fail("deep").with_path(["b"]));
        let mut root = MatchResult::new(Some(&v));
        root.compose("a", child);
        root.record_failure(fail("top"));

        assert_eq!(
            root.to_human_strings(),
            vec![
                "top (using test matcher)".to_string(),
                "deep at /a/b (using test matcher)".to_string(),
            ]
        );
    }

    #[test]
    fn test_into_owned_preserves_shape() {
        let owned = {
            let v = json!({"a": 1});
            let mut r = MatchResult::new(Some(&v));
            r.record_failure(fail("x"));
            r.into_transformed()
        };
        assert!(owned.is_transformed());
        assert_eq!(owned.target(), Some(&json!({"a": 1})));
        assert!(!owned.is_target(Some(&json!({"a": 1}))));
        assert_eq!(owned.fail_count(), 1);
    }

    #[test]
    fn test_target_identity_is_by_reference() {
        let v = json!([5, 5]);
        let items = v.as_array().unwrap();
        let r = MatchResult::new(Some(&items[0]));
        assert!(r.is_target(Some(&items[0])));
        assert!(!r.is_target(Some(&items[1])));
        assert!(MatchResult::new(None).is_target(None));
    }
}
