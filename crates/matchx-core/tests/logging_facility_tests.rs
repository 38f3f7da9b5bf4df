#![allow(clippy::unwrap_used, clippy::expect_used)]

use matchx_core::errors::{ExError, ExErrorKind, MatchError};
use matchx_core::logging_facility::test_capture::init_test_capture;
use matchx_core::{log_op_end, log_op_error, log_op_start};
use matchx_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    let starts = capture.count_events(|e| {
        e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_START)
    });
    assert_eq!(starts, 1);
}

#[test]
fn test_log_op_end_records_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let ends = capture.events_for_op(op_name);
    assert_eq!(ends.len(), 1);
    assert_eq!(ends[0].event.as_deref(), Some(EVENT_END));
    assert_eq!(ends[0].duration_ms, Some(42));
}

#[test]
fn test_log_op_error_includes_kind_and_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = MatchError::CaptureTypeMismatch {
        expected: "string",
        found: "number",
    };
    log_op_error!(op_name, err.clone(), duration_ms = 10);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END_ERROR));
    assert_eq!(events[0].duration_ms, Some(10));
    assert_eq!(
        events[0].err_code.as_deref(),
        Some("ERR_CAPTURE_TYPE_MISMATCH")
    );
    assert_eq!(events[0].err_kind.as_deref(), Some("CaptureTypeMismatch"));

    let ex_err: ExError = err.into();
    assert_eq!(ex_err.kind(), ExErrorKind::CaptureTypeMismatch);
}

#[test]
fn test_extra_fields_are_captured() {
    let capture = init_test_capture();
    let op_name = "test_log_macros_fields_unique_4";

    log_op_start!(op_name, request_id = "r-42", matcher = "arrayWith");

    let event = capture
        .events_for_op(op_name)
        .into_iter()
        .next()
        .expect("start event");
    assert_eq!(event.request_id.as_deref(), Some("r-42"));
    assert_eq!(event.fields.get("matcher"), Some(&"arrayWith".to_string()));
}

#[test]
#[should_panic(expected = "Expected event")]
fn test_assert_event_exists_fails_for_unknown_op() {
    let capture = init_test_capture();
    capture.assert_event_exists("nonexistent_op_truly_unique_999", EVENT_START);
}
