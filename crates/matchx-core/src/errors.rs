use thiserror::Error;

/// Result type alias using MatchError
pub type Result<T> = std::result::Result<T, MatchError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Match *failures* are never errors: they are recorded as data inside a
/// `MatchResult`. This taxonomy only classifies the things that stop a
/// match from running at all, each with a stable code for programmatic
/// handling and external responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Pattern construction
    NestedMatcher,
    NotUsableInSubsequence,
    InvalidRegex,

    // Capture access
    CaptureEmpty,
    CaptureTypeMismatch,

    // Wire decoding
    InvalidWireEncoding,

    // Matching
    UndecodableJson,
    AssertionFailed,

    // Integration/IO
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::NestedMatcher => "ERR_NESTED_MATCHER",
            ExErrorKind::NotUsableInSubsequence => "ERR_NOT_USABLE_IN_SUBSEQUENCE",
            ExErrorKind::InvalidRegex => "ERR_INVALID_REGEX",
            ExErrorKind::CaptureEmpty => "ERR_CAPTURE_EMPTY",
            ExErrorKind::CaptureTypeMismatch => "ERR_CAPTURE_TYPE_MISMATCH",
            ExErrorKind::InvalidWireEncoding => "ERR_INVALID_WIRE_ENCODING",
            ExErrorKind::UndecodableJson => "ERR_UNDECODABLE_JSON",
            ExErrorKind::AssertionFailed => "ERR_ASSERTION_FAILED",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// This error type provides a structured representation of errors with
/// classification fields for programmatic handling and rich context for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    matcher: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            matcher: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the name of the matcher involved
    pub fn with_matcher(mut self, matcher: impl Into<String>) -> Self {
        self.matcher = Some(matcher.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the matcher name, if any
    pub fn matcher(&self) -> Option<&str> {
        self.matcher.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(matcher) = &self.matcher {
            write!(f, " (matcher: {})", matcher)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Errors raised while building or running matchers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchError {
    // ===== Construction Errors =====
    /// A literal pattern was handed a matcher at its top level
    #[error(
        "LiteralMatch cannot directly contain another matcher ({matcher}). \
         Remove the top-level matcher or nest it more deeply."
    )]
    NestedMatcherInLiteral { matcher: String },

    /// A positionless matcher was used as an arrayWith element
    #[error("The Matcher {matcher}() cannot be nested within arrayWith()")]
    NotUsableInArrayWith { matcher: String },

    /// A stringLikeRegexp pattern does not compile
    #[error("Invalid regular expression '{pattern}': {reason}")]
    InvalidRegex { pattern: String, reason: String },

    // ===== Capture Errors =====
    /// A capture accessor was called before any value was committed
    #[error("No value captured")]
    CaptureEmpty,

    /// The captured value has a different type than the accessor asked for
    #[error("Captured value is expected to be {expected} but found {found}")]
    CaptureTypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    // ===== Wire Errors =====
    /// The expected-pattern wire encoding is malformed
    #[error("Invalid expected-pattern encoding: {reason}")]
    InvalidWireEncoding { reason: String },

    // ===== Matching Errors =====
    /// JSON decoding failed for a reason other than bad syntax
    #[error("Could not decode JSON value: {reason}")]
    UndecodableJson { reason: String },

    /// The assertion failed and the request asked for the failure to be raised
    #[error("{assertion}")]
    AssertionFailed { assertion: String },

    /// Encoding an assertion payload failed
    #[error("Serialization failed: {reason}")]
    Serialization { reason: String },
}

impl From<MatchError> for ExError {
    fn from(err: MatchError) -> Self {
        let message = err.to_string();
        match err {
            MatchError::NestedMatcherInLiteral { matcher } => {
                ExError::new(ExErrorKind::NestedMatcher)
                    .with_matcher(matcher)
                    .with_message(message)
            }

            MatchError::NotUsableInArrayWith { matcher } => {
                ExError::new(ExErrorKind::NotUsableInSubsequence)
                    .with_matcher(matcher)
                    .with_message(message)
            }

            MatchError::InvalidRegex { .. } => ExError::new(ExErrorKind::InvalidRegex)
                .with_matcher("stringLikeRegexp")
                .with_message(message),

            MatchError::CaptureEmpty => ExError::new(ExErrorKind::CaptureEmpty)
                .with_matcher("Capture")
                .with_message(message),

            MatchError::CaptureTypeMismatch { .. } => {
                ExError::new(ExErrorKind::CaptureTypeMismatch)
                    .with_matcher("Capture")
                    .with_message(message)
            }

            MatchError::InvalidWireEncoding { .. } => {
                ExError::new(ExErrorKind::InvalidWireEncoding).with_message(message)
            }

            MatchError::UndecodableJson { .. } => ExError::new(ExErrorKind::UndecodableJson)
                .with_matcher("serializedJson")
                .with_message(message),

            MatchError::AssertionFailed { .. } => {
                ExError::new(ExErrorKind::AssertionFailed).with_message(message)
            }

            MatchError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for MatchError {
    fn from(err: serde_json::Error) -> Self {
        MatchError::Serialization {
            reason: err.to_string(),
        }
    }
}
