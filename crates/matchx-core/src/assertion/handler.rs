//! Assertion request handling.
//!
//! Decodes a request, runs the match, and encodes the outcome as the
//! `assertion` payload an orchestrator reports back.

use super::decode::{decode_call, decode_expected, root_matcher};
use crate::errors::{MatchError, Result};
use crate::{log_op_end, log_op_error, log_op_start};
use matchx_core_types::RequestId;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// An assertion to evaluate. Both sides are JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssertionRequest {
    /// The observed value; empty or absent means missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    /// The expected pattern in wire encoding
    pub expected: String,
    /// Turn a failed assertion into an error
    #[serde(default)]
    pub fail_deployment: bool,
    /// Correlation id for log events; generated when not supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Outcome payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionResult {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub failed: bool,
    /// JSON-encoded [`AssertionStatus`]
    pub assertion: String,
}

impl AssertionResult {
    /// Decode the `assertion` payload
    ///
    /// # Errors
    ///
    /// - `Serialization` if the payload is not a valid status document
    pub fn status(&self) -> Result<AssertionStatus> {
        Ok(serde_json::from_str(&self.assertion)?)
    }
}

/// Status document carried in [`AssertionResult::assertion`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AssertionStatus {
    Success,
    Fail { message: String },
}

struct Outcome {
    result: AssertionResult,
    fail_count: usize,
    fail_cost: u32,
}

/// Evaluate an assertion request
///
/// # Errors
///
/// - `InvalidWireEncoding` / `InvalidRegex` if the expected pattern cannot
///   be decoded
/// - `UndecodableJson` if a nested JSON string cannot be decoded
/// - `AssertionFailed` if the assertion failed and `fail_deployment` is set;
///   the error carries the encoded assertion payload
pub fn handle(request: &AssertionRequest) -> Result<AssertionResult> {
    let request_id = request
        .request_id
        .clone()
        .map(RequestId::from_string)
        .unwrap_or_default();
    log_op_start!(
        "handle_assertion",
        request_id = request_id.as_str(),
        fail_deployment = request.fail_deployment
    );
    let start = Instant::now();

    let outcome = handle_impl(request).map_err(|e| {
        log_op_error!(
            "handle_assertion",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = request_id.as_str()
        );
        e
    })?;

    log_op_end!(
        "handle_assertion",
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = request_id.as_str(),
        fail_count = outcome.fail_count as u64,
        fail_cost = outcome.fail_cost
    );

    Ok(outcome.result)
}

fn handle_impl(request: &AssertionRequest) -> Result<Outcome> {
    let actual = decode_call(request.actual.as_deref());
    let expected = decode_call(Some(&request.expected)).ok_or_else(|| {
        MatchError::InvalidWireEncoding {
            reason: "expected value is empty".to_string(),
        }
    })?;

    let matcher = root_matcher(decode_expected(expected)?);
    let result = matcher.test_value(actual.as_ref())?.finished();

    let status = if result.has_failed() {
        AssertionStatus::Fail {
            message: result.render_mismatch(),
        }
    } else {
        AssertionStatus::Success
    };
    let payload = AssertionResult {
        failed: result.has_failed(),
        assertion: serde_json::to_string(&status)?,
    };

    if payload.failed && request.fail_deployment {
        return Err(MatchError::AssertionFailed {
            assertion: payload.assertion,
        });
    }

    Ok(Outcome {
        result: payload,
        fail_count: result.fail_count(),
        fail_cost: result.fail_cost(),
    })
}
