use super::{matcher_for, Matcher};
use crate::errors::{MatchError, Result};
use crate::model::value::{display_plain, ValueExt};
use crate::model::Pattern;
use crate::result::{Failure, MatchResult};
use serde_json::{Map, Value};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Records the value found at its position in a pattern.
///
/// Values are held in the match result and only land here when the
/// overall result is finished without failures. Clones share the same
/// log, so a `Capture` can be embedded in a pattern and read afterwards.
#[derive(Debug, Clone)]
pub struct Capture {
    inner: Arc<CaptureState>,
}

#[derive(Debug)]
struct CaptureState {
    pattern: Option<Arc<dyn Matcher>>,
    log: Mutex<CaptureLog>,
}

#[derive(Debug, Default)]
struct CaptureLog {
    values: Vec<Value>,
    idx: usize,
}

impl Capture {
    pub fn new() -> Self {
        Self::from_state(None)
    }

    /// Only capture values that also match `pattern`. Plain object
    /// patterns ignore extra keys.
    pub fn with_pattern(pattern: impl Into<Pattern>) -> Self {
        Self::from_state(Some(matcher_for("Capture", pattern.into(), true)))
    }

    fn from_state(pattern: Option<Arc<dyn Matcher>>) -> Self {
        Self {
            inner: Arc::new(CaptureState {
                pattern,
                log: Mutex::new(CaptureLog::default()),
            }),
        }
    }

    fn log(&self) -> MutexGuard<'_, CaptureLog> {
        self.inner.log.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn same_as(&self, other: &Capture) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn commit(&self, values: Vec<Value>) {
        self.log().values.extend(values);
    }

    /// Every committed value, oldest first
    pub fn captured(&self) -> Vec<Value> {
        self.log().values.clone()
    }

    /// The current value
    ///
    /// # Errors
    ///
    /// - `CaptureEmpty` if nothing has been captured
    pub fn value(&self) -> Result<Value> {
        let log = self.log();
        let current = log.values.get(log.idx).cloned();
        current.ok_or(MatchError::CaptureEmpty)
    }

    /// Move to the next captured value. Returns false, without moving, when
    /// there is none.
    pub fn next(&self) -> bool {
        let mut log = self.log();
        if log.idx + 1 < log.values.len() {
            log.idx += 1;
            true
        } else {
            false
        }
    }

    /// # Errors
    ///
    /// - `CaptureEmpty` if nothing has been captured
    /// - `CaptureTypeMismatch` if the current value is not a string
    pub fn as_string(&self) -> Result<String> {
        match self.value()? {
            Value::String(s) => Ok(s),
            other => Err(mismatch("string", &other)),
        }
    }

    /// # Errors
    ///
    /// - `CaptureEmpty` if nothing has been captured
    /// - `CaptureTypeMismatch` if the current value is not a number
    pub fn as_number(&self) -> Result<f64> {
        let value = self.value()?;
        value.as_f64().ok_or_else(|| mismatch("number", &value))
    }

    /// # Errors
    ///
    /// - `CaptureEmpty` if nothing has been captured
    /// - `CaptureTypeMismatch` if the current value is not a boolean
    pub fn as_boolean(&self) -> Result<bool> {
        let value = self.value()?;
        value.as_bool().ok_or_else(|| mismatch("boolean", &value))
    }

    /// # Errors
    ///
    /// - `CaptureEmpty` if nothing has been captured
    /// - `CaptureTypeMismatch` if the current value is not an array
    pub fn as_array(&self) -> Result<Vec<Value>> {
        match self.value()? {
            Value::Array(items) => Ok(items),
            other => Err(mismatch("array", &other)),
        }
    }

    /// # Errors
    ///
    /// - `CaptureEmpty` if nothing has been captured
    /// - `CaptureTypeMismatch` if the current value is not an object
    pub fn as_object(&self) -> Result<Map<String, Value>> {
        match self.value()? {
            Value::Object(fields) => Ok(fields),
            other => Err(mismatch("object", &other)),
        }
    }
}

impl Default for Capture {
    fn default() -> Self {
        Self::new()
    }
}

fn mismatch(expected: &'static str, found: &Value) -> MatchError {
    MatchError::CaptureTypeMismatch {
        expected,
        found: found.type_name(),
    }
}

impl Matcher for Capture {
    fn name(&self) -> &str {
        "Capture"
    }

    fn test_value<'a>(&self, actual: Option<&'a Value>) -> Result<MatchResult<'a>> {
        let mut result = MatchResult::new(actual);
        let value = match actual {
            Some(value) if !value.is_null() => value,
            _ => {
                return Ok(result.with_failure(Failure::new(
                    self.name(),
                    format!(
                        "Can only capture non-nullish values. Found {}",
                        display_plain(actual)
                    ),
                )))
            }
        };

        if let Some(pattern) = &self.inner.pattern {
            let inner = pattern.test(value)?;
            if inner.has_failed() {
                return Ok(inner);
            }
        }

        result.record_capture(self, value.clone());
        Ok(result)
    }
}
