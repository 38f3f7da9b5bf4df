//! Algebraic properties of matching, checked over generated JSON values.

use matchx_core::{Failure, Match, MatchResult, Pattern};
use proptest::prelude::*;
use serde_json::{Map, Value};

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,4}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

proptest! {
    #[test]
    fn exact_matches_itself(v in arb_json()) {
        let pattern = Match::exact(v.clone()).unwrap();
        let result = pattern.test(&v).unwrap().finished();
        prop_assert!(result.is_success());
        prop_assert_eq!(result.render_mismatch(), "<match>");
    }

    #[test]
    fn repeated_tests_agree(a in arb_json(), b in arb_json()) {
        let pattern = Match::exact(a).unwrap();
        let first = pattern.test(&b).unwrap();
        let second = pattern.test(&b).unwrap();
        prop_assert_eq!(first.has_failed(), second.has_failed());
        prop_assert_eq!(first.fail_count(), second.fail_count());
        prop_assert_eq!(first.fail_cost(), second.fail_cost());
        prop_assert_eq!(first.render_mismatch(), second.render_mismatch());
    }

    #[test]
    fn failed_iff_failures_counted(a in arb_json(), b in arb_json()) {
        let result = Match::exact(a).unwrap().test(&b).unwrap();
        prop_assert_eq!(result.has_failed(), result.fail_count() > 0);
        prop_assert_eq!(result.failures().len(), result.fail_count());
        prop_assert_eq!(result.to_human_strings().len(), result.fail_count());
    }

    #[test]
    fn negation_inverts(a in arb_json(), b in arb_json()) {
        let plain = Match::exact(a.clone()).unwrap().test(&b).unwrap().has_failed();
        let negated = Match::not(a).test(&b).unwrap().has_failed();
        prop_assert_eq!(negated, !plain);
    }

    #[test]
    fn object_like_accepts_supersets(
        fields in prop::collection::btree_map("[a-z]{1,4}", arb_json(), 0..6),
        keep in prop::collection::vec(any::<bool>(), 6),
    ) {
        let subset: Vec<(String, Pattern)> = fields
            .iter()
            .zip(keep.iter().cycle())
            .filter(|(_, keep)| **keep)
            .map(|((k, v), _)| (k.clone(), Pattern::from(v.clone())))
            .collect();
        let actual = Value::Object(fields.into_iter().collect());

        let result = Match::object_like(subset).test(&actual).unwrap();
        prop_assert!(result.is_success());
    }

    #[test]
    fn object_equals_rejects_extra_keys(
        fields in prop::collection::btree_map("[a-z]{1,4}", arb_json(), 1..6),
    ) {
        let mut entries: Vec<(String, Pattern)> = fields
            .iter()
            .map(|(k, v)| (k.clone(), Pattern::from(v.clone())))
            .collect();
        let dropped = entries.pop().map(|(k, _)| k).unwrap_or_default();
        let actual = Value::Object(fields.into_iter().collect());

        let result = Match::object_equals(entries).test(&actual).unwrap();
        let expected_message = format!("Unexpected key '{dropped}'");
        prop_assert!(result.has_failed());
        prop_assert!(result
            .failures()
            .iter()
            .any(|f| f.message == expected_message));
    }

    #[test]
    fn array_with_accepts_ordered_subsequences(
        items in prop::collection::vec(arb_json(), 0..8),
        keep in prop::collection::vec(any::<bool>(), 8),
    ) {
        let subsequence: Vec<Pattern> = items
            .iter()
            .zip(keep.iter())
            .filter(|(_, keep)| **keep)
            .map(|(v, _)| Pattern::from(v.clone()))
            .collect();
        let actual = Value::Array(items);

        let result = Match::array_with(subsequence).unwrap().test(&actual).unwrap();
        prop_assert!(result.is_success());
    }

    #[test]
    fn empty_array_with_accepts_any_array(items in prop::collection::vec(arb_json(), 0..6)) {
        let actual = Value::Array(items);
        let result = Match::array_with(vec![]).unwrap().test(&actual).unwrap();
        prop_assert!(result.is_success());
    }
}

#[test]
fn array_with_is_order_sensitive() {
    let actual = serde_json::json!(["p", "x", "q", "y", "r"]);
    let forward = Match::array_with(vec!["x".into(), "y".into()]).unwrap();
    let backward = Match::array_with(vec!["y".into(), "x".into()]).unwrap();

    assert!(forward.test(&actual).unwrap().is_success());
    assert!(backward.test(&actual).unwrap().has_failed());
}

#[test]
fn absent_fails_on_null_and_zero() {
    let pattern = Match::object_like([("k", Match::absent())]);

    assert!(pattern.test(&serde_json::json!({})).unwrap().is_success());
    assert!(pattern.test(&serde_json::json!({"k": null})).unwrap().has_failed());
    assert!(pattern.test(&serde_json::json!({"k": 0})).unwrap().has_failed());
}

#[test]
fn informational_failures_still_fail() {
    let value = serde_json::json!(1);
    let only_notes = MatchResult::new(Some(&value))
        .with_failure(Failure::new("arrayWith", "arrayWith pattern 0 matched here").with_cost(0));

    assert!(only_notes.has_failed());
    assert_eq!(only_notes.fail_count(), 1);
    assert_eq!(only_notes.fail_cost(), 0);
}

#[test]
fn matched_here_notes_are_cost_free() {
    // pattern 0 matches at index 0, pattern 1 runs out of elements
    let pattern = Match::array_with(vec![1.into(), 2.into()]).unwrap();
    let actual = serde_json::json!([1]);
    let result = pattern.test(&actual).unwrap();
    assert!(result.has_failed());

    let note = result.inner("0").expect("matched-here note is kept");
    assert!(note.has_failed());
    assert_eq!(note.fail_cost(), 0);
    assert_eq!(result.fail_cost(), 1);
}
