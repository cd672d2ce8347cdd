//! Ruleset year folding.

use std::collections::BTreeSet;

use proptest::prelude::*;
use proptest::test_runner::Config;

use cin_model::{CinTable, RuleCode, Snapshot};
use cin_validate::{
    RegistryError, RuleContext, RuleDefinition, RuleEngine, RuleRegistry, RulesetHistory,
    RulesetVersion, ValidationOptions, default_rulesets,
};

fn noop(_: &mut Snapshot, _: &mut RuleContext<'_>) -> anyhow::Result<()> {
    Ok(())
}

fn rule(code: &str, message: &str) -> RuleDefinition {
    RuleDefinition::new(code, CinTable::CinDetails, message, noop)
}

fn summary(registry: &RuleRegistry) -> Vec<(String, String)> {
    registry
        .iter()
        .map(|r| (r.code.to_string(), r.message.clone()))
        .collect()
}

#[test]
fn test_delete_and_update_across_years() {
    let mut history = RulesetHistory::new();
    history
        .push(RulesetVersion::new(
            "base",
            RuleRegistry::from_rules([rule("A", "a"), rule("B", "b")]).unwrap(),
        ))
        .unwrap();
    history
        .push(
            RulesetVersion::new(
                "next",
                RuleRegistry::from_rules([rule("B", "b updated")]).unwrap(),
            )
            .with_deleted(["A"]),
        )
        .unwrap();

    assert_eq!(
        summary(&history.build_effective_set("next").unwrap()),
        [("B".to_string(), "b updated".to_string())]
    );
    assert_eq!(
        summary(&history.build_effective_set("base").unwrap()),
        [
            ("A".to_string(), "a".to_string()),
            ("B".to_string(), "b".to_string())
        ]
    );
}

#[test]
fn test_default_rulesets() {
    let history = default_rulesets().unwrap();
    assert_eq!(
        history.years().collect::<Vec<_>>(),
        ["cin2022_23", "cin2023_24"]
    );
    assert_eq!(history.latest(), Some("cin2023_24"));

    let base = history.build_effective_set("cin2022_23").unwrap();
    let latest = history.build_effective_set("cin2023_24").unwrap();
    assert_eq!(summary(&base), summary(&latest));
    assert_eq!(base.len(), 8);
}

#[test]
fn test_unknown_year_is_fatal() {
    let engine = RuleEngine::with_default_rulesets().unwrap();
    let options = ValidationOptions {
        ruleset: Some("cin1999_00".to_string()),
        ..ValidationOptions::default()
    };

    let err = engine.validate(&Snapshot::empty(), &options).unwrap_err();
    assert_eq!(
        err,
        RegistryError::UnknownRulesetYear {
            year: "cin1999_00".to_string()
        }
    );
}

/// One year of changes: codes to add or update and codes to delete, drawn
/// from a small pool so collisions are common.
fn year_changes() -> impl Strategy<Value = (BTreeSet<u8>, BTreeSet<u8>)> {
    (
        prop::collection::btree_set(0_u8..12, 0..6),
        prop::collection::btree_set(0_u8..12, 0..4),
    )
}

fn build_history(years: &[(BTreeSet<u8>, BTreeSet<u8>)]) -> RulesetHistory {
    let mut history = RulesetHistory::new();
    for (idx, (added, deleted)) in years.iter().enumerate() {
        let year = format!("y{idx:02}");
        let rules = RuleRegistry::from_rules(
            added
                .iter()
                .map(|code| rule(&format!("R{code:02}"), &format!("{year} R{code:02}"))),
        )
        .unwrap();
        let deleted: Vec<String> = deleted.iter().map(|code| format!("R{code:02}")).collect();
        let version = if idx == 0 {
            RulesetVersion::new(year, rules)
        } else {
            RulesetVersion::new(year, rules).with_deleted(deleted.iter().map(String::as_str))
        };
        history.push(version).unwrap();
    }
    history
}

proptest! {
    #![proptest_config(Config::with_cases(64))]

    #[test]
    fn effective_set_is_deterministic(years in prop::collection::vec(year_changes(), 1..6)) {
        let history = build_history(&years);
        for year in history.years() {
            let first = summary(&history.build_effective_set(year).unwrap());
            let second = summary(&history.build_effective_set(year).unwrap());
            prop_assert_eq!(&first, &second);

            let rebuilt = summary(&build_history(&years).build_effective_set(year).unwrap());
            prop_assert_eq!(first, rebuilt);
        }
    }

    #[test]
    fn readded_code_is_restored(code in 0_u8..12, base in prop::collection::btree_set(0_u8..12, 1..6)) {
        let mut base = base;
        base.insert(code);
        let years = vec![
            (base, BTreeSet::new()),
            (BTreeSet::new(), BTreeSet::from([code])),
            (BTreeSet::from([code]), BTreeSet::new()),
        ];
        let history = build_history(&years);
        let target = RuleCode::from(format!("R{code:02}").as_str());

        prop_assert!(!history.build_effective_set("y01").unwrap().contains(&target));
        let restored = history.build_effective_set("y02").unwrap();
        prop_assert_eq!(
            restored.get(&target).map(|r| r.message.clone()),
            Some(format!("y02 R{code:02}"))
        );
    }
}
