//! Helpers for exercising a single rule in tests.

use cin_model::Snapshot;

use crate::context::RuleContext;
use crate::issue::{AggregateIssue, ClassifiedIssues};
use crate::rules::RuleDefinition;

/// Issues a rule reported, already classified the way the engine would.
#[derive(Debug)]
pub struct RuleRun {
    pub definition: RuleDefinition,
    pub result: anyhow::Result<()>,
    pub issues: Option<ClassifiedIssues>,
    pub aggregates: Vec<AggregateIssue>,
}

impl RuleRun {
    /// Row indices of a row-pointer classification, in push order.
    pub fn rows(&self) -> Vec<usize> {
        match &self.issues {
            Some(ClassifiedIssues::RowPointer(issues)) => {
                issues.iter().map(|issue| issue.row).collect()
            }
            _ => Vec::new(),
        }
    }
}

/// Runs `definition` once against a copy of `snapshot`.
///
/// Unlike the engine, errors and panics are not caught, so a failing rule
/// fails the test that ran it.
pub fn run_rule(definition: RuleDefinition, snapshot: &Snapshot) -> RuleRun {
    let mut copy = snapshot.clone();
    let mut ctx = RuleContext::new(&definition);
    let result = (definition.func)(&mut copy, &mut ctx);
    let (issues, aggregates) = ctx.into_classified();
    RuleRun {
        definition,
        result,
        issues,
        aggregates,
    }
}
