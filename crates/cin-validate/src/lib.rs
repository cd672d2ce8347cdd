//! CIN census validation engine.
//!
//! Rules are plain functions registered per census year. The engine runs each
//! one against its own copy of a [`cin_model::Snapshot`], classifies what the
//! rule reported and folds everything into a [`ValidationReport`].

mod catalog;
pub mod context;
pub mod engine;
pub mod error;
pub mod issue;
pub mod report;
pub mod rules;
pub mod testing;

pub use context::RuleContext;
pub use engine::{RuleEngine, ValidationOptions, execute_rule, run_rules};
pub use error::{ErrorKind, RegistryError};
pub use issue::{AggregateIssue, ClassifiedIssues, GroupedIssue, IssueShape, RowIssue};
pub use report::{ErroredRule, RuleOutcome, RuleStatus, RuleSummary, ValidationReport, Violation};
pub use rules::{
    FieldRef, RuleDefinition, RuleFn, RuleKind, RuleRegistry, RulesetHistory, RulesetVersion,
    default_rulesets,
};
