//! Registry errors and rule failure kinds.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use cin_model::RuleCode;

/// Errors raised while building a registry or resolving a ruleset year.
///
/// These are fatal and surface to the caller; per-rule failures never do.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("rule {code} is already registered in this ruleset")]
    DuplicateRule { code: RuleCode },
    #[error("ruleset year {year} has not been registered")]
    UnknownRulesetYear { year: String },
    #[error("ruleset year {year} must come after {previous}")]
    OutOfOrderRuleset { year: String, previous: String },
    #[error("no ruleset years have been registered")]
    EmptyHistory,
}

/// Why a rule ended up in `errored_rules`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// An expected table, column or value was missing from the snapshot.
    MalformedSnapshot,
    /// The rule returned any other error.
    RuleExecution,
    /// The rule panicked.
    Panic,
}

impl ErrorKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::MalformedSnapshot => "malformed snapshot",
            Self::RuleExecution => "rule execution",
            Self::Panic => "panic",
        }
    }
}
