/// Scenario 3: Array length mismatches in full-order mode
use matchx_core::{Match, Pattern};
use serde_json::json;

fn pattern(items: &[i64]) -> Pattern {
    Match::array_equals(items.iter().map(|i| Pattern::from(*i)).collect())
}

#[test]
fn test_scenario_03_not_enough_elements() {
    // GIVEN arrayEquals([1, 2, 3])
    let pattern = pattern(&[1, 2, 3]);

    // WHEN the actual array is shorter
    let actual = json!([1, 2]);
    let result = pattern.test(&actual).expect("match runs");

    // THEN a failure sits at the first missing index
    assert!(result.has_failed());
    let failures = result.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].path, vec!["2"]);
    assert!(failures[0].message.contains("Not enough elements"));
}

#[test]
fn test_scenario_03_not_enough_elements_renders_trailing_marker() {
    let pattern = pattern(&[1, 2, 3]);
    let actual = json!([1]);
    let result = pattern.test(&actual).expect("match runs");

    assert_eq!(
        result.render_mismatch(),
        "[\n  1\n!! Not enough elements in array (expecting 3, got 1)\n  \n]"
    );
}

#[test]
fn test_scenario_03_too_many_elements_marks_first_extra() {
    let pattern = pattern(&[1]);
    let actual = json!([1, 2]);
    let result = pattern.test(&actual).expect("match runs");

    assert_eq!(
        result.render_mismatch(),
        "[\n  1,\n!! Too many elements in array (expecting 1, got 2)\n  2\n]"
    );
}

#[test]
fn test_scenario_03_element_mismatch_and_length_both_reported() {
    let pattern = pattern(&[1, 5, 3]);
    let actual = json!([1, 2]);
    let result = pattern.test(&actual).expect("match runs");

    assert_eq!(
        result.to_human_strings(),
        vec![
            "Not enough elements in array (expecting 3, got 2) at /2 (using arrayEquals matcher)",
            "Expected 5 but received 2 at /1 (using arrayEquals matcher)",
        ]
    );
}
