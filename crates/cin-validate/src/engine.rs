//! Runs a ruleset against a snapshot and assembles the report.
//!
//! Every rule gets its own copy of the snapshot and a fresh context. A rule
//! that returns an error or panics is recorded as errored and the run moves
//! on; only registry problems (unknown year, empty history) abort.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

use tracing::{debug, debug_span, info, info_span, warn};

use cin_model::{ErrorId, Snapshot, SnapshotError};

use crate::context::RuleContext;
use crate::error::{ErrorKind, RegistryError};
use crate::issue::ClassifiedIssues;
use crate::report::{RuleOutcome, RuleStatus, ValidationReport};
use crate::rules::{RuleDefinition, RuleRegistry, RulesetHistory, default_rulesets};

/// Options for a single validation run.
#[derive(Debug, Clone, Default)]
pub struct ValidationOptions {
    /// Ruleset year; `None` selects the latest registered year.
    pub ruleset: Option<String>,
    /// Restrict the reported violations to one correlation key.
    pub error_id: Option<ErrorId>,
}

/// Validates snapshots against a ruleset history.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    history: RulesetHistory,
}

impl RuleEngine {
    pub fn new(history: RulesetHistory) -> Self {
        Self { history }
    }

    /// Engine over the shipped ruleset years.
    pub fn with_default_rulesets() -> Result<Self, RegistryError> {
        Ok(Self::new(default_rulesets()?))
    }

    pub fn history(&self) -> &RulesetHistory {
        &self.history
    }

    /// Resolves the requested year, runs its effective rules and applies the
    /// optional key filter.
    pub fn validate(
        &self,
        snapshot: &Snapshot,
        options: &ValidationOptions,
    ) -> Result<ValidationReport, RegistryError> {
        let (year, rules) = self.history.resolve(options.ruleset.as_deref())?;
        let report = run_rules(&year, &rules, snapshot);
        Ok(match &options.error_id {
            Some(error_id) => report.filter_by_error_id(error_id),
            None => report,
        })
    }
}

/// Runs every rule in `rules`, in code order, against `snapshot`.
pub fn run_rules(ruleset: &str, rules: &RuleRegistry, snapshot: &Snapshot) -> ValidationReport {
    let span = info_span!("validate", ruleset = %ruleset, rules = rules.len());
    let _guard = span.enter();

    let outcomes: Vec<RuleOutcome> = rules.iter().map(|rule| execute_rule(rule, snapshot)).collect();
    let report = ValidationReport::from_outcomes(ruleset, outcomes);

    info!(
        passed = report.passed_rule_codes.len(),
        failed = report.failed_count(),
        errored = report.errored_rules.len(),
        violations = report.violations.len(),
        "validation complete"
    );
    report
}

/// Runs one rule against its own copy of `snapshot` and classifies the result.
pub fn execute_rule(rule: &RuleDefinition, snapshot: &Snapshot) -> RuleOutcome {
    let span = debug_span!("rule", code = %rule.code);
    let _guard = span.enter();

    let mut copy = snapshot.clone();
    let mut ctx = RuleContext::new(rule);
    let result = catch_unwind(AssertUnwindSafe(|| (rule.func)(&mut copy, &mut ctx)));

    let status = match result {
        Ok(Ok(())) => classify(ctx),
        Ok(Err(error)) => {
            let kind = if error.downcast_ref::<SnapshotError>().is_some() {
                ErrorKind::MalformedSnapshot
            } else {
                ErrorKind::RuleExecution
            };
            errored(kind, format!("{error:#}"))
        }
        Err(payload) => errored(ErrorKind::Panic, panic_message(payload.as_ref())),
    };

    if let RuleStatus::Errored { kind, message } = &status {
        warn!(code = %rule.code, kind = kind.label(), %message, "rule errored");
    }

    RuleOutcome {
        code: rule.code.clone(),
        kind: rule.kind,
        status,
    }
}

fn classify(ctx: RuleContext<'_>) -> RuleStatus {
    let (issues, aggregates) = ctx.into_classified();
    match (&issues, aggregates.is_empty()) {
        (None, true) => {
            debug!("passed");
            RuleStatus::Passed
        }
        _ => {
            debug!(
                shape = issues.as_ref().map(|i| i.shape().label()),
                count = issues.as_ref().map_or(0, ClassifiedIssues::count),
                aggregates = aggregates.len(),
                "failed"
            );
            RuleStatus::Failed { issues, aggregates }
        }
    }
}

fn errored(kind: ErrorKind, message: String) -> RuleStatus {
    RuleStatus::Errored { kind, message }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&'static str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "rule panicked".to_string()
    }
}
