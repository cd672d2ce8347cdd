use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Identifier of a validation rule (e.g. `4013`, `2888Q`).
///
/// Codes order as strings; every published census code is four digits with
/// an optional suffix, so this matches numeric order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleCode(String);

impl RuleCode {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidRuleCode(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<i32> for RuleCode {
    fn from(code: i32) -> Self {
        Self(code.to_string())
    }
}

/// Unchecked conversion for codes written in source; use [`RuleCode::new`]
/// for external input.
impl From<&str> for RuleCode {
    fn from(code: &str) -> Self {
        Self(code.trim().to_string())
    }
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for RuleCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
