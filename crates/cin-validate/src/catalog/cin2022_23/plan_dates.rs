//! CIN plan dates within the census period (4013).

use cin_common::census_period;
use cin_model::{CinTable, Snapshot, columns};

use crate::context::RuleContext;
use crate::error::RegistryError;
use crate::rules::{FieldRef, RuleDefinition, RuleRegistry};

pub(super) fn register(registry: &mut RuleRegistry) -> Result<(), RegistryError> {
    registry.register(
        RuleDefinition::new(
            4013,
            CinTable::CinPlanDates,
            "CIN Plan end date must fall within the census year",
            plan_end_within_census,
        )
        .with_affected_fields([
            FieldRef::new(CinTable::CinPlanDates, columns::CIN_PLAN_END_DATE),
            FieldRef::new(CinTable::Header, columns::REFERENCE_DATE),
        ]),
    )
}

/// If present, CINPlanEndDate must fall within the census period inclusive.
fn plan_end_within_census(snapshot: &mut Snapshot, ctx: &mut RuleContext<'_>) -> anyhow::Result<()> {
    let (collection_start, reference_date) = census_period(snapshot.reference_date()?);
    let end_dates = snapshot.date_values(CinTable::CinPlanDates, columns::CIN_PLAN_END_DATE)?;

    let failing = end_dates
        .iter()
        .enumerate()
        .filter_map(|(row, date)| match date {
            Some(date) if *date < collection_start || *date > reference_date => Some(row),
            _ => None,
        });
    ctx.push_row_issue(CinTable::CinPlanDates, columns::CIN_PLAN_END_DATE, failing);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::{test_df, with_header};
    use crate::testing::run_rule;

    fn rule() -> RuleDefinition {
        let mut registry = RuleRegistry::new();
        register(&mut registry).unwrap();
        registry.iter().next().cloned().unwrap()
    }

    #[test]
    fn test_end_dates_outside_census_year() {
        let snapshot = with_header(
            Snapshot::new().with_table(
                CinTable::CinPlanDates,
                test_df(vec![(
                    columns::CIN_PLAN_END_DATE,
                    vec!["01/03/2019", "01/04/2021", "01/10/2022", ""],
                )]),
            ),
            "31/03/2022",
        );

        let run = run_rule(rule(), &snapshot);
        run.result.as_ref().unwrap();
        assert_eq!(run.rows(), [0, 2]);
        assert_eq!(run.definition.code, "4013");
        assert_eq!(
            run.definition.message,
            "CIN Plan end date must fall within the census year"
        );
    }

    #[test]
    fn test_missing_header_is_a_snapshot_error() {
        let snapshot = Snapshot::new().with_table(
            CinTable::CinPlanDates,
            test_df(vec![(columns::CIN_PLAN_END_DATE, vec!["01/04/2021"])]),
        );

        let run = run_rule(rule(), &snapshot);
        let err = run.result.unwrap_err();
        assert!(err.downcast_ref::<cin_model::SnapshotError>().is_some());
    }
}
