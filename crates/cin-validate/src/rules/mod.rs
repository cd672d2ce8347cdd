//! Rule definitions, registries and the shipped ruleset history.

mod definition;
mod history;
mod registry;

pub use definition::{FieldRef, RuleDefinition, RuleFn, RuleKind};
pub use history::{RulesetHistory, RulesetVersion};
pub use registry::RuleRegistry;

use crate::catalog;
use crate::error::RegistryError;

/// The ruleset years shipped with the validator, oldest first.
pub fn default_rulesets() -> Result<RulesetHistory, RegistryError> {
    let mut history = RulesetHistory::new();
    history.push(catalog::cin2022_23::ruleset()?)?;
    history.push(catalog::cin2023_24::ruleset()?)?;
    Ok(history)
}
