//! Year-scoped rule sets and how they fold into an effective registry.

use cin_model::RuleCode;

use crate::error::RegistryError;
use crate::rules::registry::RuleRegistry;

/// Rules added or updated in one census year, plus the codes it retires.
#[derive(Debug, Clone)]
pub struct RulesetVersion {
    /// Year label. Labels are compared as strings, so they must sort
    /// lexically in chronological order (`cin2022_23`, `cin2023_24`).
    pub year: String,
    pub rules: RuleRegistry,
    pub deleted: Vec<RuleCode>,
}

impl RulesetVersion {
    pub fn new(year: impl Into<String>, rules: RuleRegistry) -> Self {
        Self {
            year: year.into(),
            rules,
            deleted: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_deleted<I, C>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<RuleCode>,
    {
        self.deleted = codes.into_iter().map(Into::into).collect();
        self
    }
}

/// Chronological list of ruleset versions. The first entry is the base year.
#[derive(Debug, Clone, Default)]
pub struct RulesetHistory {
    versions: Vec<RulesetVersion>,
}

impl RulesetHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a version. Its year must sort strictly after the last one as a
    /// string; `y10` after `y9` is rejected, use `y09`.
    pub fn push(&mut self, version: RulesetVersion) -> Result<(), RegistryError> {
        if let Some(previous) = self.versions.last()
            && version.year <= previous.year
        {
            return Err(RegistryError::OutOfOrderRuleset {
                year: version.year,
                previous: previous.year.clone(),
            });
        }
        self.versions.push(version);
        Ok(())
    }

    pub fn years(&self) -> impl Iterator<Item = &str> {
        self.versions.iter().map(|version| version.year.as_str())
    }

    pub fn base(&self) -> Option<&RulesetVersion> {
        self.versions.first()
    }

    pub fn latest(&self) -> Option<&str> {
        self.versions.last().map(|version| version.year.as_str())
    }

    pub fn contains(&self, year: &str) -> bool {
        self.versions.iter().any(|version| version.year == year)
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Rules in force for `year`.
    ///
    /// Starts from a copy of the base year and folds each later version up to
    /// and including `year`: deletions first, then additions and updates. The
    /// stored versions are never modified.
    pub fn build_effective_set(&self, year: &str) -> Result<RuleRegistry, RegistryError> {
        let position = self
            .versions
            .iter()
            .position(|version| version.year == year)
            .ok_or_else(|| RegistryError::UnknownRulesetYear {
                year: year.to_string(),
            })?;

        let mut effective = self.versions[0].rules.clone();
        for version in &self.versions[1..=position] {
            for code in &version.deleted {
                effective.remove(code);
            }
            for rule in &version.rules {
                effective.upsert(rule.clone());
            }
        }
        Ok(effective)
    }

    /// Effective set for `year`, or for the latest year when `None`.
    pub fn resolve(&self, year: Option<&str>) -> Result<(String, RuleRegistry), RegistryError> {
        let year = match year {
            Some(year) => year,
            None => self.latest().ok_or(RegistryError::EmptyHistory)?,
        };
        let rules = self.build_effective_set(year)?;
        Ok((year.to_string(), rules))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RuleContext;
    use crate::rules::RuleDefinition;
    use cin_model::{CinTable, Snapshot};

    fn noop(_: &mut Snapshot, _: &mut RuleContext<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    fn rule(code: &str, message: &str) -> RuleDefinition {
        RuleDefinition::new(code, CinTable::CinDetails, message, noop)
    }

    fn registry(rules: Vec<RuleDefinition>) -> RuleRegistry {
        RuleRegistry::from_rules(rules).unwrap()
    }

    fn messages(registry: &RuleRegistry) -> Vec<(String, String)> {
        registry
            .iter()
            .map(|r| (r.code.to_string(), r.message.clone()))
            .collect()
    }

    fn sample_history() -> RulesetHistory {
        let mut history = RulesetHistory::new();
        history
            .push(RulesetVersion::new(
                "2022",
                registry(vec![rule("A", "a"), rule("B", "b original")]),
            ))
            .unwrap();
        history
            .push(
                RulesetVersion::new("2023", registry(vec![rule("B", "b updated")]))
                    .with_deleted(["A"]),
            )
            .unwrap();
        history
    }

    #[test]
    fn test_later_year_deletes_and_updates() {
        let history = sample_history();
        let effective = history.build_effective_set("2023").unwrap();
        assert_eq!(
            messages(&effective),
            [("B".to_string(), "b updated".to_string())]
        );
    }

    #[test]
    fn test_base_year_is_untouched_by_later_folds() {
        let history = sample_history();
        history.build_effective_set("2023").unwrap();
        let base = history.build_effective_set("2022").unwrap();
        assert_eq!(
            messages(&base),
            [
                ("A".to_string(), "a".to_string()),
                ("B".to_string(), "b original".to_string())
            ]
        );
    }

    #[test]
    fn test_deleted_code_can_be_restored() {
        let mut history = sample_history();
        history
            .push(RulesetVersion::new("2024", registry(vec![rule("A", "a again")])))
            .unwrap();

        let effective = history.build_effective_set("2024").unwrap();
        assert!(effective.contains(&RuleCode::from("A")));
        assert_eq!(effective.len(), 2);
    }

    #[test]
    fn test_unknown_year() {
        let history = sample_history();
        assert_eq!(
            history.build_effective_set("1999").unwrap_err(),
            RegistryError::UnknownRulesetYear {
                year: "1999".to_string()
            }
        );
    }

    #[test]
    fn test_out_of_order_and_repeated_years_are_rejected() {
        let mut history = sample_history();
        let older = history.push(RulesetVersion::new("2021", RuleRegistry::new()));
        let repeat = history.push(RulesetVersion::new("2023", RuleRegistry::new()));

        assert!(matches!(
            older,
            Err(RegistryError::OutOfOrderRuleset { .. })
        ));
        assert!(matches!(
            repeat,
            Err(RegistryError::OutOfOrderRuleset { .. })
        ));
        assert_eq!(history.years().collect::<Vec<_>>(), ["2022", "2023"]);
    }

    #[test]
    fn test_year_labels_compare_lexically() {
        let mut history = RulesetHistory::new();
        history
            .push(RulesetVersion::new("y9", RuleRegistry::new()))
            .unwrap();

        assert_eq!(
            history
                .push(RulesetVersion::new("y10", RuleRegistry::new()))
                .unwrap_err(),
            RegistryError::OutOfOrderRuleset {
                year: "y10".to_string(),
                previous: "y9".to_string(),
            }
        );
        let mut padded = RulesetHistory::new();
        padded
            .push(RulesetVersion::new("y09", RuleRegistry::new()))
            .unwrap();
        padded
            .push(RulesetVersion::new("y10", RuleRegistry::new()))
            .unwrap();
        assert_eq!(padded.latest(), Some("y10"));
    }

    #[test]
    fn test_resolve_defaults_to_latest() {
        let history = sample_history();
        let (year, rules) = history.resolve(None).unwrap();
        assert_eq!(year, "2023");
        assert_eq!(rules.len(), 1);

        assert_eq!(
            RulesetHistory::new().resolve(None).unwrap_err(),
            RegistryError::EmptyHistory
        );
    }
}
