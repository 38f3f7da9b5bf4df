/// Scenario 2: Missing key
///
/// A partial object pattern names a key the actual object lacks.
use matchx_core::{Match, Pattern};
use serde_json::json;

#[test]
fn test_scenario_02_missing_key_fails_at_key_path() {
    // GIVEN objectLike({a: 1})
    let pattern = Match::object_like([("a", Pattern::from(1))]);

    // WHEN the actual object has only b
    let actual = json!({"b": 2});
    let result = pattern.test(&actual).expect("match runs").finished();

    // THEN exactly one failure is reported at ["a"]
    let failures = result.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].path, vec!["a"]);
    assert!(failures[0].message.contains("Missing key"));
    assert_eq!(failures[0].matcher, "objectLike");
}

#[test]
fn test_scenario_02_missing_key_renders_undefined() {
    let pattern = Match::object_like([("a", Pattern::from(1))]);
    let actual = json!({"b": 2});
    let result = pattern.test(&actual).expect("match runs");

    assert_eq!(
        result.render_mismatch(),
        "{\n!! Missing key 'a'\n  \"a\": undefined,\n  \"b\": 2\n}"
    );
}
