//! Child protection plan start against CIN referral (1105).

use std::collections::BTreeMap;

use chrono::NaiveDate;

use cin_model::{CinTable, ErrorId, GroupedRows, Snapshot, columns};

use crate::context::RuleContext;
use crate::error::RegistryError;
use crate::rules::{FieldRef, RuleDefinition, RuleRegistry};

pub(super) fn register(registry: &mut RuleRegistry) -> Result<(), RegistryError> {
    registry.register(
        RuleDefinition::new(
            1105,
            CinTable::ChildProtectionPlans,
            "The child protection plan start date cannot be before the referral date",
            plan_start_after_referral,
        )
        .with_affected_fields([
            FieldRef::new(CinTable::ChildProtectionPlans, columns::CPP_START_DATE),
            FieldRef::new(CinTable::CinDetails, columns::CIN_REFERRAL_DATE),
        ]),
    )
}

/// Where present, CPPstartDate must be on or after the CINreferralDate of
/// the same CIN episode.
fn plan_start_after_referral(
    snapshot: &mut Snapshot,
    ctx: &mut RuleContext<'_>,
) -> anyhow::Result<()> {
    let plans = CinTable::ChildProtectionPlans;
    let details = CinTable::CinDetails;

    let plan_children = snapshot.text_values(plans, columns::LA_CHILD_ID)?;
    let plan_episodes = snapshot.text_values(plans, columns::CIN_DETAILS_ID)?;
    let plan_starts = snapshot.date_values(plans, columns::CPP_START_DATE)?;

    let cin_children = snapshot.text_values(details, columns::LA_CHILD_ID)?;
    let cin_episodes = snapshot.text_values(details, columns::CIN_DETAILS_ID)?;
    let referrals = snapshot.date_values(details, columns::CIN_REFERRAL_DATE)?;

    let mut episodes: BTreeMap<(Option<&str>, Option<&str>), Vec<usize>> = BTreeMap::new();
    for (row, (child, episode)) in cin_children.iter().zip(&cin_episodes).enumerate() {
        episodes
            .entry((child.as_deref(), episode.as_deref()))
            .or_default()
            .push(row);
    }

    let mut plan_rows = GroupedRows::new();
    let mut cin_rows = GroupedRows::new();
    for (plan_row, start) in plan_starts.iter().enumerate() {
        let Some(start) = start else { continue };
        let episode_key = (
            plan_children[plan_row].as_deref(),
            plan_episodes[plan_row].as_deref(),
        );
        let Some(cin_matches) = episodes.get(&episode_key) else {
            continue;
        };
        for &cin_row in cin_matches {
            let Some(referral) = referrals[cin_row] else {
                continue;
            };
            if referral > *start {
                let key = error_id(episode_key.0, *start, referral);
                plan_rows.push(key.clone(), plan_row);
                cin_rows.push(key, cin_row);
            }
        }
    }

    ctx.push_cross_table_group(plans, &[columns::CPP_START_DATE], plan_rows);
    ctx.push_cross_table_group(details, &[columns::CIN_REFERRAL_DATE], cin_rows);
    Ok(())
}

fn error_id(child: Option<&str>, start: NaiveDate, referral: NaiveDate) -> ErrorId {
    ErrorId::new()
        .text(child)
        .date(Some(start))
        .date(Some(referral))
}
