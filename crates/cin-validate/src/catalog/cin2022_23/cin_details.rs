//! CIN closure consistency (8810).

use cin_model::{CinTable, ErrorId, GroupedRows, Snapshot, columns};

use crate::context::RuleContext;
use crate::error::RegistryError;
use crate::rules::{FieldRef, RuleDefinition, RuleRegistry};

pub(super) fn register(registry: &mut RuleRegistry) -> Result<(), RegistryError> {
    registry.register(
        RuleDefinition::new(
            8810,
            CinTable::CinDetails,
            "A CIN case cannot have a Reason for Closure without a CIN Closure Date",
            reason_requires_closure_date,
        )
        .with_affected_fields([
            FieldRef::new(CinTable::CinDetails, columns::REASON_FOR_CLOSURE),
            FieldRef::new(CinTable::CinDetails, columns::CIN_CLOSURE_DATE),
        ]),
    )
}

/// If ReasonForClosure is present then CINclosureDate must also be present.
///
/// Child id alone would merge several episodes of one child into a single
/// instance, so the key also carries both closure fields.
fn reason_requires_closure_date(
    snapshot: &mut Snapshot,
    ctx: &mut RuleContext<'_>,
) -> anyhow::Result<()> {
    let table = CinTable::CinDetails;
    let children = snapshot.text_values(table, columns::LA_CHILD_ID)?;
    let reasons = snapshot.text_values(table, columns::REASON_FOR_CLOSURE)?;
    let closures = snapshot.text_values(table, columns::CIN_CLOSURE_DATE)?;

    let grouped: GroupedRows = reasons
        .iter()
        .zip(&closures)
        .enumerate()
        .filter(|(_, (reason, closure))| reason.is_some() && closure.is_none())
        .map(|(row, (reason, closure))| {
            let key = ErrorId::new()
                .text(children[row].as_deref())
                .text(reason.as_deref())
                .text(closure.as_deref());
            (key, row)
        })
        .collect();

    ctx.push_single_table_group(
        table,
        &[columns::REASON_FOR_CLOSURE, columns::CIN_CLOSURE_DATE],
        grouped,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::test_df;
    use crate::issue::ClassifiedIssues;
    use crate::testing::run_rule;

    #[test]
    fn test_reason_without_closure_date() {
        let mut registry = RuleRegistry::new();
        register(&mut registry).unwrap();
        let rule = registry.get(&8810.into()).cloned().unwrap();

        let snapshot = Snapshot::new().with_table(
            CinTable::CinDetails,
            test_df(vec![
                (
                    columns::LA_CHILD_ID,
                    vec!["child1", "child2", "child3", "child4", "child4", "child5"],
                ),
                (
                    columns::REASON_FOR_CLOSURE,
                    vec!["RC1", "RC1", "RC1", "RC1", "", ""],
                ),
                (
                    columns::CIN_CLOSURE_DATE,
                    vec!["26/05/2000", "26/05/2001", "", "", "25/05/2000", ""],
                ),
            ]),
        );

        let run = run_rule(rule, &snapshot);
        run.result.as_ref().unwrap();
        let Some(ClassifiedIssues::SingleTableGroup(group)) = &run.issues else {
            panic!("expected a single-table group, got {:?}", run.issues);
        };

        assert_eq!(group.table, CinTable::CinDetails);
        assert_eq!(group.columns, ["ReasonForClosure", "CINclosureDate"]);
        assert_eq!(group.rows.len(), 2);

        let child3: ErrorId = "child3, RC1, NA".parse().unwrap();
        let child4: ErrorId = "child4, RC1, NA".parse().unwrap();
        assert_eq!(group.rows.get(&child3), Some(&[2][..]));
        assert_eq!(group.rows.get(&child4), Some(&[3][..]));
    }
}
