//! Section 47 enquiry overlap (8890).

use std::collections::BTreeMap;

use chrono::NaiveDate;

use cin_model::{CinTable, ErrorId, GroupedRows, Snapshot, columns};

use crate::context::RuleContext;
use crate::error::RegistryError;
use crate::rules::{FieldRef, RuleDefinition, RuleRegistry};

pub(super) fn register(registry: &mut RuleRegistry) -> Result<(), RegistryError> {
    registry.register(
        RuleDefinition::new(
            8890,
            CinTable::CinDetails,
            "A Section 47 enquiry is shown as starting when there is another Section 47 Enquiry ongoing",
            enquiry_overlaps_ongoing,
        )
        .with_affected_fields([FieldRef::new(
            CinTable::Section47,
            columns::S47_ACTUAL_START_DATE,
        )]),
    )
}

struct Enquiry {
    row: usize,
    start: NaiveDate,
    initial_cpc: Option<NaiveDate>,
    icpc_not_required: bool,
}

/// Within one CIN episode, a Section 47 enquiry must not start while another
/// one is ongoing.
///
/// An enquiry is ongoing from its start until its initial conference, or
/// until the reference date when no conference has been held and one is
/// still required.
fn enquiry_overlaps_ongoing(
    snapshot: &mut Snapshot,
    ctx: &mut RuleContext<'_>,
) -> anyhow::Result<()> {
    let table = CinTable::Section47;
    let reference_date = snapshot.reference_date()?;

    let children = snapshot.text_values(table, columns::LA_CHILD_ID)?;
    let episodes = snapshot.text_values(table, columns::CIN_DETAILS_ID)?;
    let starts = snapshot.date_values(table, columns::S47_ACTUAL_START_DATE)?;
    let conferences = snapshot.date_values(table, columns::DATE_OF_INITIAL_CPC)?;
    let not_required = snapshot.text_values(table, columns::ICPC_NOT_REQUIRED)?;

    let mut by_episode: BTreeMap<(Option<&str>, Option<&str>), Vec<Enquiry>> = BTreeMap::new();
    for (row, start) in starts.iter().enumerate() {
        let Some(start) = *start else { continue };
        by_episode
            .entry((children[row].as_deref(), episodes[row].as_deref()))
            .or_default()
            .push(Enquiry {
                row,
                start,
                initial_cpc: conferences[row],
                icpc_not_required: not_required[row].as_deref() == Some("1"),
            });
    }

    let mut later_rows = GroupedRows::new();
    let mut ongoing_rows = GroupedRows::new();
    for ((child, episode), enquiries) in &by_episode {
        for later in enquiries {
            for ongoing in enquiries {
                let duplicate =
                    later.start == ongoing.start && later.initial_cpc == ongoing.initial_cpc;
                if duplicate || later.start < ongoing.start {
                    continue;
                }
                let overlaps = match ongoing.initial_cpc {
                    Some(cpc) => later.start <= cpc,
                    None => later.start <= reference_date && !ongoing.icpc_not_required,
                };
                if overlaps {
                    let key = ErrorId::new()
                        .text(*child)
                        .text(*episode)
                        .date(Some(later.start));
                    later_rows.push(key.clone(), later.row);
                    ongoing_rows.push(key, ongoing.row);
                }
            }
        }
    }

    ctx.push_grouped_by_partition(table, &[columns::S47_ACTUAL_START_DATE], later_rows);
    ctx.push_grouped_by_partition(
        table,
        &[columns::S47_ACTUAL_START_DATE, columns::DATE_OF_INITIAL_CPC],
        ongoing_rows,
    );
    Ok(())
}
