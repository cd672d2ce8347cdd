//! 2022/23 census rules: the base year.

mod assessments;
mod characteristics;
mod cin_details;
mod disabilities;
mod identifiers;
mod plan_dates;
mod protection_plans;
mod section47;

use crate::error::RegistryError;
use crate::rules::{RuleRegistry, RulesetVersion};

pub const YEAR: &str = "cin2022_23";

pub fn ruleset() -> Result<RulesetVersion, RegistryError> {
    let mut rules = RuleRegistry::new();
    assessments::register(&mut rules)?;
    characteristics::register(&mut rules)?;
    cin_details::register(&mut rules)?;
    disabilities::register(&mut rules)?;
    identifiers::register(&mut rules)?;
    plan_dates::register(&mut rules)?;
    protection_plans::register(&mut rules)?;
    section47::register(&mut rules)?;
    Ok(RulesetVersion::new(YEAR, rules))
}
