use super::{matcher_for, Matcher};
use crate::errors::Result;
use crate::model::value::type_name_of;
use crate::model::Pattern;
use crate::result::{Failure, MatchResult};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Object matcher. In partial mode extra actual keys are ignored.
#[derive(Debug)]
pub struct ObjectMatch {
    name: String,
    entries: BTreeMap<String, Arc<dyn Matcher>>,
    partial: bool,
}

impl ObjectMatch {
    /// Plain values under `entries` become literals that inherit `partial`
    pub fn new(name: impl Into<String>, entries: BTreeMap<String, Pattern>, partial: bool) -> Self {
        let name = name.into();
        let entries = entries
            .into_iter()
            .map(|(key, pattern)| {
                let matcher = matcher_for(&name, pattern, partial);
                (key, matcher)
            })
            .collect();
        Self {
            name,
            entries,
            partial,
        }
    }

    fn failure(&self, message: String) -> Failure {
        Failure::new(&self.name, message)
    }
}

impl Matcher for ObjectMatch {
    fn name(&self) -> &str {
        &self.name
    }

    fn test_value<'a>(&self, actual: Option<&'a Value>) -> Result<MatchResult<'a>> {
        let Some(Value::Object(fields)) = actual else {
            return Ok(MatchResult::new(actual).with_failure(self.failure(format!(
                "Expected type object but received {}",
                type_name_of(actual)
            ))));
        };

        let mut result = MatchResult::new(actual);
        if !self.partial {
            for key in fields.keys().filter(|k| !self.entries.contains_key(*k)) {
                result.record_failure(
                    self.failure(format!("Unexpected key '{key}'"))
                        .with_path([key.as_str()]),
                );
            }
        }

        for (key, matcher) in &self.entries {
            match fields.get(key) {
                Some(value) => {
                    result.compose(key.clone(), matcher.test(value)?);
                }
                None if matcher.is_absent() => {}
                None => {
                    result.record_failure(
                        self.failure(format!("Missing key '{key}'"))
                            .with_path([key.as_str()]),
                    );
                }
            }
        }

        Ok(result)
    }
}
