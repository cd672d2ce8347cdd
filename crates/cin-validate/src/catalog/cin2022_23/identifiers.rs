//! Children without a CIN episode (8590).

use std::collections::BTreeSet;

use cin_model::{CinTable, ErrorId, GroupedRows, Snapshot, columns};

use crate::context::RuleContext;
use crate::error::RegistryError;
use crate::rules::{FieldRef, RuleDefinition, RuleRegistry};

pub(super) fn register(registry: &mut RuleRegistry) -> Result<(), RegistryError> {
    registry.register(
        RuleDefinition::new(
            8590,
            CinTable::ChildIdentifiers,
            "Child does not have a recorded CIN episode.",
            child_has_cin_episode,
        )
        .with_affected_fields([FieldRef::new(
            CinTable::ChildIdentifiers,
            columns::LA_CHILD_ID,
        )]),
    )
}

/// Every child must appear in CINdetails at least once.
fn child_has_cin_episode(snapshot: &mut Snapshot, ctx: &mut RuleContext<'_>) -> anyhow::Result<()> {
    let children = snapshot.text_values(CinTable::ChildIdentifiers, columns::LA_CHILD_ID)?;
    let with_episode: BTreeSet<Option<String>> = snapshot
        .text_values(CinTable::CinDetails, columns::LA_CHILD_ID)?
        .into_iter()
        .collect();

    let grouped: GroupedRows = children
        .iter()
        .enumerate()
        .filter(|(_, child)| !with_episode.contains(*child))
        .map(|(row, child)| (ErrorId::new().text(child.as_deref()), row))
        .collect();

    ctx.push_cross_table_group(CinTable::ChildIdentifiers, &[columns::LA_CHILD_ID], grouped);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::test_df;
    use crate::issue::ClassifiedIssues;
    use crate::testing::run_rule;

    #[test]
    fn test_child_without_episode() {
        let mut registry = RuleRegistry::new();
        register(&mut registry).unwrap();
        let rule = registry.get(&8590.into()).cloned().unwrap();

        let snapshot = Snapshot::new()
            .with_table(
                CinTable::ChildIdentifiers,
                test_df(vec![(
                    columns::LA_CHILD_ID,
                    vec!["child1", "child2", "child3", "child4"],
                )]),
            )
            .with_table(
                CinTable::CinDetails,
                test_df(vec![(
                    columns::LA_CHILD_ID,
                    vec!["child1", "child2", "child4", "child5"],
                )]),
            );

        let run = run_rule(rule, &snapshot);
        run.result.as_ref().unwrap();
        let Some(ClassifiedIssues::CrossTableGroup(groups)) = &run.issues else {
            panic!("expected cross-table groups, got {:?}", run.issues);
        };

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].table, CinTable::ChildIdentifiers);
        let rows: Vec<(String, Vec<usize>)> = groups[0]
            .rows
            .iter()
            .map(|(key, rows)| (key.to_string(), rows.to_vec()))
            .collect();
        assert_eq!(rows, [("child3".to_string(), vec![2])]);
    }
}
