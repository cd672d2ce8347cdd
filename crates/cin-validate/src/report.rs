//! Aggregate report assembled from per-rule outcomes.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use cin_model::{CinTable, ErrorId, RuleCode};

use crate::error::ErrorKind;
use crate::issue::{AggregateIssue, ClassifiedIssues, GroupedIssue, IssueShape};
use crate::rules::RuleKind;

/// What happened when one rule ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleStatus {
    Passed,
    /// At least one issue was reported. `issues` is `None` when the rule only
    /// raised aggregate issues.
    Failed {
        issues: Option<ClassifiedIssues>,
        aggregates: Vec<AggregateIssue>,
    },
    Errored { kind: ErrorKind, message: String },
}

/// Status of one rule, tagged with its code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub code: RuleCode,
    pub kind: RuleKind,
    pub status: RuleStatus,
}

impl RuleOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self.status, RuleStatus::Passed)
    }

    pub fn is_errored(&self) -> bool {
        matches!(self.status, RuleStatus::Errored { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSummary {
    pub code: RuleCode,
    pub kind: RuleKind,
    pub count: usize,
    pub shape: IssueShape,
}

/// One located violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub rule_code: RuleCode,
    pub table: CinTable,
    pub columns: Vec<String>,
    pub row: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_id: Option<ErrorId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErroredRule {
    pub code: RuleCode,
    pub kind: ErrorKind,
    pub message: String,
}

/// Result of validating one snapshot against one ruleset year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub ruleset: String,
    pub passed_rule_codes: BTreeSet<RuleCode>,
    pub per_rule_summary: Vec<RuleSummary>,
    pub violations: Vec<Violation>,
    pub aggregate_issues: Vec<AggregateIssue>,
    pub errored_rules: Vec<ErroredRule>,
}

impl ValidationReport {
    /// Builds the report from outcomes, ordering everything by rule code so
    /// the result does not depend on execution order.
    pub fn from_outcomes(ruleset: impl Into<String>, mut outcomes: Vec<RuleOutcome>) -> Self {
        outcomes.sort_by(|a, b| a.code.cmp(&b.code));

        let mut report = Self {
            ruleset: ruleset.into(),
            ..Self::default()
        };
        for outcome in outcomes {
            report.record(outcome);
        }
        report
    }

    fn record(&mut self, outcome: RuleOutcome) {
        let RuleOutcome { code, kind, status } = outcome;
        match status {
            RuleStatus::Passed => {
                self.passed_rule_codes.insert(code);
            }
            RuleStatus::Errored { kind: error, message } => {
                self.errored_rules.push(ErroredRule {
                    code,
                    kind: error,
                    message,
                });
            }
            RuleStatus::Failed { issues, aggregates } => {
                let summary = match &issues {
                    Some(classified) => RuleSummary {
                        code: code.clone(),
                        kind,
                        count: classified.count(),
                        shape: classified.shape(),
                    },
                    None => RuleSummary {
                        code: code.clone(),
                        kind,
                        count: aggregates.len(),
                        shape: IssueShape::Aggregate,
                    },
                };
                self.per_rule_summary.push(summary);
                if let Some(classified) = issues {
                    self.violations.extend(flatten(&code, classified));
                }
                self.aggregate_issues.extend(aggregates);
            }
        }
    }

    /// Copy of the report keeping only violations whose key equals `error_id`.
    pub fn filter_by_error_id(&self, error_id: &ErrorId) -> Self {
        Self {
            violations: self
                .violations
                .iter()
                .filter(|violation| violation.error_id.as_ref() == Some(error_id))
                .cloned()
                .collect(),
            ..self.clone()
        }
    }

    /// True when no rule failed or errored and no aggregate issue was raised.
    pub fn is_clean(&self) -> bool {
        self.per_rule_summary.is_empty()
            && self.errored_rules.is_empty()
            && self.aggregate_issues.is_empty()
    }

    pub fn failed_count(&self) -> usize {
        self.per_rule_summary.len()
    }

    pub fn summary_for(&self, code: &RuleCode) -> Option<&RuleSummary> {
        self.per_rule_summary.iter().find(|summary| &summary.code == code)
    }

    pub fn violations_for<'a>(
        &'a self,
        code: &'a RuleCode,
    ) -> impl Iterator<Item = &'a Violation> + 'a {
        self.violations
            .iter()
            .filter(move |violation| &violation.rule_code == code)
    }
}

fn flatten(code: &RuleCode, issues: ClassifiedIssues) -> Vec<Violation> {
    match issues {
        ClassifiedIssues::RowPointer(rows) => rows
            .into_iter()
            .map(|issue| Violation {
                rule_code: code.clone(),
                table: issue.table,
                columns: vec![issue.column],
                row: issue.row,
                error_id: None,
            })
            .collect(),
        ClassifiedIssues::SingleTableGroup(group) => flatten_group(code, &group),
        ClassifiedIssues::CrossTableGroup(groups) | ClassifiedIssues::PartitionGroup(groups) => {
            groups
                .iter()
                .flat_map(|group| flatten_group(code, group))
                .collect()
        }
    }
}

fn flatten_group(code: &RuleCode, group: &GroupedIssue) -> Vec<Violation> {
    let mut violations = Vec::with_capacity(group.rows.row_count());
    for (error_id, rows) in group.rows.iter() {
        for row in rows {
            violations.push(Violation {
                rule_code: code.clone(),
                table: group.table,
                columns: group.columns.clone(),
                row: *row,
                error_id: Some(error_id.clone()),
            });
        }
    }
    violations
}
