//! Matchers and the pattern construction API.
//!
//! Every node of a [`Pattern`] is backed by a [`Matcher`]. Plain values are
//! matched by [`LiteralMatch`]; the partial-match operators are built with
//! the [`Match`] factory.
//!
//! ```
//! use matchx_core::matchers::Match;
//! use serde_json::json;
//!
//! let pattern = Match::object_like([
//!     ("a", json!(1).into()),
//!     ("list", Match::array_with(vec![2.into(), 4.into()]).unwrap()),
//!     ("extra", Match::absent()),
//! ]);
//! let actual = json!({"a": 1, "b": 2, "list": [1, 2, 3, 4, 5]});
//! let result = pattern.test(&actual).unwrap().finished();
//! assert!(result.is_success());
//! ```

mod array;
mod capture;
mod leaf;
mod literal;
mod not;
mod object;
mod serialized_json;

pub use array::ArrayMatch;
pub use capture::Capture;
pub use leaf::{AbsentMatch, AnyMatch, StringLikeRegexpMatch};
pub use literal::LiteralMatch;
pub use not::NotMatch;
pub use object::ObjectMatch;
pub use serialized_json::SerializedJsonMatch;

use crate::errors::Result;
use crate::model::Pattern;
use crate::result::MatchResult;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A node that judges a value
pub trait Matcher: fmt::Debug + Send + Sync {
    /// Name reported in failures
    fn name(&self) -> &str;

    /// Test a possibly-missing value.
    ///
    /// Mismatches are recorded in the returned result.
    ///
    /// # Errors
    ///
    /// Reserved for conditions that stop the match from running at all,
    /// such as `UndecodableJson` from `serializedJson`.
    fn test_value<'a>(&self, actual: Option<&'a Value>) -> Result<MatchResult<'a>>;

    /// Test a present value
    ///
    /// # Errors
    ///
    /// As for [`test_value`](Self::test_value)
    fn test<'a>(&self, actual: &'a Value) -> Result<MatchResult<'a>> {
        self.test_value(Some(actual))
    }

    /// Whether this matcher may appear directly inside `arrayWith`
    fn usable_in_subsequence(&self) -> bool {
        true
    }

    /// Whether this matcher asserts that a key is missing
    fn is_absent(&self) -> bool {
        false
    }
}

/// Build the matcher for one pattern node. Matcher nodes are used as they
/// are; plain values become literals carrying `name` and `partial_objects`.
pub(crate) fn matcher_for(name: &str, pattern: Pattern, partial_objects: bool) -> Arc<dyn Matcher> {
    match pattern {
        Pattern::Matcher(matcher) => matcher,
        Pattern::Scalar(value) => Arc::new(LiteralMatch::scalar(name, value)),
        Pattern::Array(items) => Arc::new(LiteralMatch::array(name, items, partial_objects)),
        Pattern::Object(entries) => Arc::new(LiteralMatch::object(name, entries, partial_objects)),
    }
}

/// Pattern construction API
pub struct Match;

impl Match {
    /// Deep equality against `pattern`. Matchers may appear nested inside
    /// arrays and objects, but not at the top level.
    ///
    /// # Errors
    ///
    /// - `NestedMatcherInLiteral` if `pattern` is itself a matcher
    pub fn exact(pattern: impl Into<Pattern>) -> Result<Pattern> {
        Ok(Pattern::matcher(LiteralMatch::new(
            "exact",
            pattern.into(),
            false,
        )?))
    }

    /// The given elements must appear in order within the actual array,
    /// not necessarily adjacent.
    ///
    /// # Errors
    ///
    /// - `NotUsableInArrayWith` if an element is `absent()` or `any_value()`
    pub fn array_with(items: Vec<Pattern>) -> Result<Pattern> {
        Ok(Pattern::matcher(ArrayMatch::subsequence(
            "arrayWith",
            items,
            false,
        )?))
    }

    /// The actual array must have exactly these elements, in order
    pub fn array_equals(items: Vec<Pattern>) -> Pattern {
        Pattern::matcher(ArrayMatch::full("arrayEquals", items, false))
    }

    /// Every given key must match; extra actual keys are ignored at every
    /// depth of the literal pattern.
    pub fn object_like<I, K, P>(entries: I) -> Pattern
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: Into<Pattern>,
    {
        Pattern::matcher(ObjectMatch::new("objectLike", collect_entries(entries), true))
    }

    /// The actual object must have exactly the given keys
    pub fn object_equals<I, K, P>(entries: I) -> Pattern
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: Into<Pattern>,
    {
        Pattern::matcher(ObjectMatch::new(
            "objectEquals",
            collect_entries(entries),
            false,
        ))
    }

    /// Passes when `pattern` does not match
    pub fn not(pattern: impl Into<Pattern>) -> Pattern {
        Pattern::matcher(NotMatch::new("not", pattern.into()))
    }

    /// The actual value is a string holding JSON that matches `pattern`
    pub fn serialized_json(pattern: impl Into<Pattern>) -> Pattern {
        Pattern::matcher(SerializedJsonMatch::new("serializedJson", pattern.into()))
    }

    /// The key must not be present
    pub fn absent() -> Pattern {
        Pattern::matcher(AbsentMatch::new("absent"))
    }

    /// Any present, non-null value
    pub fn any_value() -> Pattern {
        Pattern::matcher(AnyMatch::new("anyValue"))
    }

    /// A string matching the regular expression `pattern` (multi-line mode)
    ///
    /// # Errors
    ///
    /// - `InvalidRegex` if `pattern` does not compile
    pub fn string_like_regexp(pattern: &str) -> Result<Pattern> {
        Ok(Pattern::matcher(StringLikeRegexpMatch::new(
            "stringLikeRegexp",
            pattern,
        )?))
    }
}

fn collect_entries<I, K, P>(entries: I) -> std::collections::BTreeMap<String, Pattern>
where
    I: IntoIterator<Item = (K, P)>,
    K: Into<String>,
    P: Into<Pattern>,
{
    entries
        .into_iter()
        .map(|(k, p)| (k.into(), p.into()))
        .collect()
}
