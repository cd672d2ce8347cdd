//! Ethnicity code validation (4220).

use cin_model::{CinTable, Snapshot, columns};

use crate::context::RuleContext;
use crate::error::RegistryError;
use crate::rules::{FieldRef, RuleDefinition, RuleRegistry};

const ETHNICITY_CODES: &[&str] = &[
    "ABAN", "AIND", "AOTH", "APKN", "BAFR", "BCRB", "BOTH", "CHNE", "MOTH", "MWAS", "MWBA", "MWBC",
    "NOBT", "OOTH", "REFU", "WBRI", "WIRI", "WIRT", "WOTH", "WROM",
];

pub(super) fn register(registry: &mut RuleRegistry) -> Result<(), RegistryError> {
    registry.register(
        RuleDefinition::new(
            4220,
            CinTable::ChildCharacteristics,
            "Ethnicity is missing or invalid (see Ethnicity table)",
            ethnicity_valid,
        )
        .with_affected_fields([FieldRef::new(
            CinTable::ChildCharacteristics,
            columns::ETHNICITY,
        )]),
    )
}

/// Ethnicity must be present and a valid code.
fn ethnicity_valid(snapshot: &mut Snapshot, ctx: &mut RuleContext<'_>) -> anyhow::Result<()> {
    let values = snapshot.text_values(CinTable::ChildCharacteristics, columns::ETHNICITY)?;

    let failing = values
        .iter()
        .enumerate()
        .filter(|(_, value)| {
            value
                .as_deref()
                .is_none_or(|code| !ETHNICITY_CODES.contains(&code))
        })
        .map(|(row, _)| row);
    ctx.push_row_issue(CinTable::ChildCharacteristics, columns::ETHNICITY, failing);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::test_df;
    use crate::testing::run_rule;

    #[test]
    fn test_missing_and_unknown_codes() {
        let mut registry = RuleRegistry::new();
        register(&mut registry).unwrap();
        let rule = registry.get(&4220.into()).cloned().unwrap();

        let snapshot = Snapshot::new().with_table(
            CinTable::ChildCharacteristics,
            test_df(vec![(
                columns::ETHNICITY,
                vec!["ABAB", "AIND", "AOTH", "", "MOTH", "WOTH", "AAAA"],
            )]),
        );

        let run = run_rule(rule, &snapshot);
        run.result.as_ref().unwrap();
        assert_eq!(run.rows(), [0, 3, 6]);
        assert_eq!(
            run.definition.message,
            "Ethnicity is missing or invalid (see Ethnicity table)"
        );
    }
}
