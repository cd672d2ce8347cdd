//! Assessment factor code checks (8617).

use cin_model::{CinTable, Snapshot, columns};

use crate::context::RuleContext;
use crate::error::RegistryError;
use crate::rules::{FieldRef, RuleDefinition, RuleRegistry};

pub(super) fn register(registry: &mut RuleRegistry) -> Result<(), RegistryError> {
    registry.register(
        RuleDefinition::new(
            8617,
            CinTable::Assessments,
            "Code 8A has been returned. This code is not a valid code.",
            factor_8a_not_allowed,
        )
        .with_affected_fields([FieldRef::new(
            CinTable::Assessments,
            columns::ASSESSMENT_FACTORS,
        )]),
    )
}

fn factor_8a_not_allowed(snapshot: &mut Snapshot, ctx: &mut RuleContext<'_>) -> anyhow::Result<()> {
    let factors = snapshot.text_values(CinTable::Assessments, columns::ASSESSMENT_FACTORS)?;

    let failing = factors
        .iter()
        .enumerate()
        .filter(|(_, factor)| factor.as_deref() == Some("8A"))
        .map(|(row, _)| row);
    ctx.push_row_issue(CinTable::Assessments, columns::ASSESSMENT_FACTORS, failing);
    Ok(())
}
