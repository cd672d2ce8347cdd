//! 2023/24 census rules. No changes from 2022/23 so far.

use crate::error::RegistryError;
use crate::rules::{RuleRegistry, RulesetVersion};

pub const YEAR: &str = "cin2023_24";

pub fn ruleset() -> Result<RulesetVersion, RegistryError> {
    Ok(RulesetVersion::new(YEAR, RuleRegistry::new()))
}
