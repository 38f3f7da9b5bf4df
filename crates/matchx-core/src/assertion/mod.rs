//! Assertion handling over JSON-encoded requests.
//!
//! A request carries the actual value and the expected pattern as JSON
//! strings. The expected side uses a small wire encoding for partial-match
//! operators; see [`decode::decode_expected`].

pub mod decode;
pub mod handler;

pub use decode::{decode_call, decode_expected, root_matcher};
pub use handler::{handle, AssertionRequest, AssertionResult, AssertionStatus};
