//! Disability coverage query across the authority (2888Q).

use std::collections::BTreeMap;

use cin_model::{CinTable, Snapshot, columns};

use crate::context::RuleContext;
use crate::error::RegistryError;
use crate::rules::{FieldRef, RuleDefinition, RuleKind, RuleRegistry};

const NO_DISABILITY: &str = "NONE";

pub(super) fn register(registry: &mut RuleRegistry) -> Result<(), RegistryError> {
    registry.register(
        RuleDefinition::new(
            "2888Q",
            CinTable::Disabilities,
            "Please check and either amend or provide a reason: Only one disability code is recorded per child and multiple disabilities should be recorded where possible.",
            multiple_disabilities_recorded,
        )
        .with_kind(RuleKind::Query)
        .with_affected_fields([FieldRef::new(CinTable::Disabilities, columns::DISABILITY)]),
    )
}

/// Across the authority, at least one child with a disability should have
/// more than one recorded. `NONE` does not count as a disability.
fn multiple_disabilities_recorded(
    snapshot: &mut Snapshot,
    ctx: &mut RuleContext<'_>,
) -> anyhow::Result<()> {
    let children = snapshot.text_values(CinTable::Disabilities, columns::LA_CHILD_ID)?;
    let disabilities = snapshot.text_values(CinTable::Disabilities, columns::DISABILITY)?;

    let mut per_child: BTreeMap<Option<&str>, usize> = BTreeMap::new();
    for (child, disability) in children.iter().zip(&disabilities) {
        if disability
            .as_deref()
            .is_some_and(|code| !code.eq_ignore_ascii_case(NO_DISABILITY))
        {
            *per_child.entry(child.as_deref()).or_default() += 1;
        }
    }

    if per_child.values().max().is_some_and(|max| *max <= 1) {
        let definition = ctx.definition();
        ctx.push_aggregate_issue(definition.code.clone(), definition.message.clone());
    }
    Ok(())
}
