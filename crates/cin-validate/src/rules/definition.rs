//! Rule metadata and the check function it carries.

use std::fmt;

use serde::{Deserialize, Serialize};

use cin_model::{CinTable, RuleCode, Snapshot};

use crate::context::RuleContext;

/// Signature of a rule check.
///
/// The rule receives its own copy of the snapshot and reports violations
/// through the context. Returning an error marks the rule as errored; it
/// never aborts the run.
pub type RuleFn = fn(&mut Snapshot, &mut RuleContext<'_>) -> anyhow::Result<()>;

/// Whether a rule is a hard error or an advisory query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    #[default]
    Error,
    Query,
}

impl RuleKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Query => "Query",
        }
    }
}

/// A (table, column) reference.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FieldRef {
    pub table: CinTable,
    pub column: String,
}

impl FieldRef {
    pub fn new(table: CinTable, column: impl Into<String>) -> Self {
        Self {
            table,
            column: column.into(),
        }
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}

/// One validation rule. Identity is the code.
#[derive(Clone)]
pub struct RuleDefinition {
    pub code: RuleCode,
    pub table: CinTable,
    pub message: String,
    pub affected_fields: Vec<FieldRef>,
    pub kind: RuleKind,
    pub func: RuleFn,
}

impl RuleDefinition {
    pub fn new(
        code: impl Into<RuleCode>,
        table: CinTable,
        message: impl Into<String>,
        func: RuleFn,
    ) -> Self {
        Self {
            code: code.into(),
            table,
            message: message.into(),
            affected_fields: Vec::new(),
            kind: RuleKind::Error,
            func,
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: RuleKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the affected fields, keeping first-seen order and dropping repeats.
    #[must_use]
    pub fn with_affected_fields<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = FieldRef>,
    {
        self.affected_fields.clear();
        for field in fields {
            if !self.affected_fields.contains(&field) {
                self.affected_fields.push(field);
            }
        }
        self
    }
}

impl fmt::Debug for RuleDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleDefinition")
            .field("code", &self.code)
            .field("table", &self.table)
            .field("message", &self.message)
            .field("affected_fields", &self.affected_fields)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cin_model::columns;

    fn noop(_: &mut Snapshot, _: &mut RuleContext<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    #[test]
    fn test_builder_sets_metadata() {
        let rule = RuleDefinition::new(8617, CinTable::Assessments, "Code 8A", noop)
            .with_kind(RuleKind::Query)
            .with_affected_fields([
                FieldRef::new(CinTable::Assessments, columns::ASSESSMENT_FACTORS),
                FieldRef::new(CinTable::Assessments, columns::ASSESSMENT_FACTORS),
            ]);

        assert_eq!(rule.code, "8617");
        assert_eq!(rule.kind, RuleKind::Query);
        assert_eq!(rule.affected_fields.len(), 1);
        assert_eq!(rule.affected_fields[0].to_string(), "Assessments.AssessmentFactors");
    }
}
