use super::{matcher_for, Matcher};
use crate::errors::{MatchError, Result};
use crate::model::value::type_name_of;
use crate::model::Pattern;
use crate::result::{Failure, MatchResult};
use crate::sorting::{sort_key_comparator, SortKey};
use crate::sparse_matrix::SparseMatrix;
use serde_json::Value;
use std::sync::Arc;

/// Array matcher, in full-order or subsequence mode
#[derive(Debug)]
pub struct ArrayMatch {
    name: String,
    elements: Vec<Arc<dyn Matcher>>,
    subsequence: bool,
}

impl ArrayMatch {
    /// Every element must match, in order, with no elements left over
    pub fn full(name: impl Into<String>, items: Vec<Pattern>, partial_objects: bool) -> Self {
        let name = name.into();
        let elements = items
            .into_iter()
            .map(|p| matcher_for(&name, p, partial_objects))
            .collect();
        Self {
            name,
            elements,
            subsequence: false,
        }
    }

    /// The elements must appear in order, possibly with gaps
    ///
    /// # Errors
    ///
    /// - `NotUsableInArrayWith` if an element is a matcher that cannot be
    ///   placed at an array position (`absent`, `anyValue`)
    pub fn subsequence(
        name: impl Into<String>,
        items: Vec<Pattern>,
        partial_objects: bool,
    ) -> Result<Self> {
        let name = name.into();
        let elements = items
            .into_iter()
            .map(|p| {
                let matcher = matcher_for(&name, p, partial_objects);
                if matcher.usable_in_subsequence() {
                    Ok(matcher)
                } else {
                    Err(MatchError::NotUsableInArrayWith {
                        matcher: matcher.name().to_string(),
                    })
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            name,
            elements,
            subsequence: true,
        })
    }

    fn failure(&self, message: String) -> Failure {
        Failure::new(&self.name, message)
    }

    fn test_full<'a>(&self, actual: &'a Value, items: &'a [Value]) -> Result<MatchResult<'a>> {
        let mut result = MatchResult::new(Some(actual));
        for (i, (matcher, item)) in self.elements.iter().zip(items).enumerate() {
            result.compose(i.to_string(), matcher.test(item)?);
        }

        let expected_len = self.elements.len();
        let shortest = expected_len.min(items.len());
        if shortest < expected_len {
            result.record_failure(
                self.failure(format!(
                    "Not enough elements in array (expecting {}, got {})",
                    expected_len,
                    items.len()
                ))
                .with_path([shortest.to_string()]),
            );
        }
        if shortest < items.len() {
            result.record_failure(
                self.failure(format!(
                    "Too many elements in array (expecting {}, got {})",
                    expected_len,
                    items.len()
                ))
                .with_path([shortest.to_string()]),
            );
        }
        Ok(result)
    }

    /// Greedy left-to-right scan. Each pattern element takes the first
    /// actual element it matches; there is no backtracking.
    fn test_subsequence<'a>(
        &self,
        actual: &'a Value,
        items: &'a [Value],
    ) -> Result<MatchResult<'a>> {
        let mut result = MatchResult::new(Some(actual));
        let mut trials: SparseMatrix<MatchResult<'a>> = SparseMatrix::new();
        let mut pattern_idx = 0;
        let mut actual_idx = 0;

        while pattern_idx < self.elements.len() && actual_idx < items.len() {
            let trial = self.elements[pattern_idx].test(&items[actual_idx])?;
            let passed = trial.is_success();
            trials.set(pattern_idx, actual_idx, trial.clone());

            actual_idx += 1;
            if passed {
                // keyed one past the matching element
                result.compose(actual_idx.to_string(), trial);
                pattern_idx += 1;
            }
        }

        if pattern_idx == self.elements.len() {
            return Ok(result);
        }

        for matched in 0..pattern_idx {
            let Some((index, _)) = trials
                .row(matched)
                .into_iter()
                .find(|(_, trial)| trial.is_success())
            else {
                continue;
            };
            let note = MatchResult::new(Some(&items[index])).with_failure(
                self.failure(format!("arrayWith pattern {matched} matched here"))
                    .with_cost(0),
            );
            result.compose(index.to_string(), note);
        }

        let mut candidates: Vec<(usize, u32)> = trials
            .row(pattern_idx)
            .into_iter()
            .map(|(index, trial)| (index, trial.fail_cost()))
            .collect();
        candidates.sort_by(sort_key_comparator(|(index, cost): &(usize, u32)| {
            vec![SortKey::from(*cost), SortKey::from(*index)]
        }));

        match candidates.first() {
            Some(&(index, _)) => {
                result.record_failure(
                    self.failure(format!(
                        "Could not match arrayWith pattern {pattern_idx}. This is the closest match"
                    ))
                    .with_path([index.to_string()])
                    .with_cost(0),
                );
                if let Some(closest) = trials.remove(pattern_idx, index) {
                    result.compose(index.to_string(), closest);
                }
            }
            None => {
                result.record_failure(
                    self.failure(format!(
                        "Could not match arrayWith pattern {pattern_idx}. No more elements to try"
                    ))
                    .with_path([items.len().to_string()]),
                );
            }
        }

        Ok(result)
    }
}

impl Matcher for ArrayMatch {
    fn name(&self) -> &str {
        &self.name
    }

    fn test_value<'a>(&self, actual: Option<&'a Value>) -> Result<MatchResult<'a>> {
        match actual {
            Some(value @ Value::Array(items)) if self.subsequence => {
                self.test_subsequence(value, items)
            }
            Some(value @ Value::Array(items)) => self.test_full(value, items),
            _ => Ok(MatchResult::new(actual).with_failure(self.failure(format!(
                "Expected type array but received {}",
                type_name_of(actual)
            )))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchers::Match;
    use serde_json::json;

    fn items(values: Value) -> Vec<Pattern> {
        match Pattern::from(values) {
            Pattern::Array(items) => items,
            other => vec![other],
        }
    }

    #[test]
    fn test_full_mode_length_mismatches() {
        let m = ArrayMatch::full("arrayEquals", items(json!([1, 2, 3])), false);

        let actual = json!([1, 2]);
        let short = m.test(&actual).unwrap();
        let f = short.failures();
        assert_eq!(f.len(), 1);
        assert_eq!(f[0].path, vec!["2"]);
        assert_eq!(
            f[0].message,
            "Not enough elements in array (expecting 3, got 2)"
        );

        let actual = json!([1, 2, 3, 4]);
        let long = m.test(&actual).unwrap();
        assert_eq!(
            long.failures()[0].message,
            "Too many elements in array (expecting 3, got 4)"
        );
    }

    #[test]
    fn test_non_array_fails_at_own_path() {
        let m = ArrayMatch::full("arrayEquals", vec![], false);
        let actual = json!({"a": 1});
        let r = m.test(&actual).unwrap();
        let f = r.failures();
        assert!(f[0].path.is_empty());
        assert_eq!(f[0].message, "Expected type array but received object");
    }

    #[test]
    fn test_subsequence_law() {
        let actual = json!(["p", "x", "q", "y", "r"]);
        let in_order = ArrayMatch::subsequence("arrayWith", items(json!(["x", "y"])), false).unwrap();
        let reversed = ArrayMatch::subsequence("arrayWith", items(json!(["y", "x"])), false).unwrap();
        let empty = ArrayMatch::subsequence("arrayWith", vec![], false).unwrap();

        assert!(in_order.test(&actual).unwrap().is_success());
        assert!(reversed.test(&actual).unwrap().has_failed());
        assert!(empty.test(&actual).unwrap().is_success());
        assert!(empty.test(&json!([])).unwrap().is_success());
    }

    #[test]
    fn test_subsequence_reports_where_earlier_elements_matched() {
        let m = ArrayMatch::subsequence("arrayWith", items(json!([2, 9])), false).unwrap();
        let actual = json!([1, 2, 3]);
        let r = m.test(&actual).unwrap();

        let strings = r.to_human_strings();
        assert!(strings.contains(&"arrayWith pattern 0 matched here at /1 (using arrayWith matcher)".to_string()));
        assert!(strings.contains(&"Could not match arrayWith pattern 1. This is the closest match at /2 (using arrayWith matcher)".to_string()));
        // the informational notes cost nothing; the closest trial costs 1
        assert_eq!(r.fail_cost(), 1);
    }

    #[test]
    fn test_subsequence_closest_prefers_cheapest_then_first() {
        let pattern = items(json!([{"a": 1, "b": 2}]));
        let m = ArrayMatch::subsequence("arrayWith", pattern, false).unwrap();
        let actual = json!([{"a": 0, "b": 0}, {"a": 1, "b": 0}, {"a": 0, "b": 2}]);
        let r = m.test(&actual).unwrap();

        let closest = r.failures_at("1");
        assert_eq!(closest.len(), 1);
        assert!(closest[0].message.ends_with("This is the closest match"));
        assert!(r.inner("1").is_some());
        assert!(r.inner("0").is_none());
    }

    #[test]
    fn test_subsequence_exhausted_actual() {
        let m = ArrayMatch::subsequence("arrayWith", items(json!([1, 2])), false).unwrap();
        let actual = json!([1]);
        let r = m.test(&actual).unwrap();
        let last = r.failures_at("1");
        assert_eq!(last.len(), 1);
        assert_eq!(
            last[0].message,
            "Could not match arrayWith pattern 1. No more elements to try"
        );
        assert_eq!(last[0].cost, 1);
    }

    #[test]
    fn test_positionless_matchers_rejected() {
        for (bad, name) in [(Match::absent(), "absent"), (Match::any_value(), "anyValue")] {
            let err = ArrayMatch::subsequence("arrayWith", vec![bad], false).unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("The Matcher {name}() cannot be nested within arrayWith()")
            );
        }
    }
}
