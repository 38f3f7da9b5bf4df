//! matchx core - structural pattern matching over JSON values
//!
//! This crate decides whether an actual JSON value matches an expected
//! pattern and, when it does not, explains why:
//! - Patterns mixing literal values with partial-match operators at any depth
//! - Subsequence array matching with deterministic blame on failure
//! - Superset object matching, negation, regex strings and nested JSON
//! - Composable match results with an annotated diff renderer
//! - Value captures committed only on overall success
//! - An assertion handler over a JSON wire encoding of patterns
//!
//! ```
//! use matchx_core::{Match, Pattern};
//! use serde_json::json;
//!
//! let pattern = Match::object_like([("a", Pattern::from(1))]);
//! let actual = json!({"b": 2});
//! let result = pattern.test(&actual).unwrap().finished();
//! assert!(result.has_failed());
//! assert_eq!(
//!     result.to_human_strings(),
//!     vec!["Missing key 'a' at /a (using objectLike matcher)"]
//! );
//! ```

pub mod assertion;
pub mod errors;
pub mod logging_facility;
pub mod matchers;
pub mod model;
pub mod result;
pub mod sorting;
pub mod sparse_matrix;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, MatchError, Result};
pub use matchers::{Capture, Match, Matcher};
pub use model::Pattern;
pub use result::{Failure, MatchResult};
pub use sparse_matrix::SparseMatrix;
