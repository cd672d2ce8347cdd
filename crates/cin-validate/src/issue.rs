//! Issue shapes a rule can report through.

use std::fmt;

use serde::{Deserialize, Serialize};

use cin_model::{CinTable, GroupedRows, RuleCode};

/// Which reporting protocol a rule used.
///
/// Variant order is the classification precedence used to break ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueShape {
    /// One pointer per invalid cell.
    RowPointer,
    /// Several columns of one table, grouped by correlation key.
    SingleTableGroup,
    /// One logical violation spanning rows of several tables.
    CrossTableGroup,
    /// Repeated occurrences within one table, grouped by a natural key.
    PartitionGroup,
    /// A judgment about the whole data set.
    Aggregate,
}

impl IssueShape {
    pub fn label(&self) -> &'static str {
        match self {
            Self::RowPointer => "row pointer",
            Self::SingleTableGroup => "single-table group",
            Self::CrossTableGroup => "cross-table group",
            Self::PartitionGroup => "partition group",
            Self::Aggregate => "aggregate",
        }
    }
}

impl fmt::Display for IssueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single invalid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowIssue {
    pub table: CinTable,
    pub column: String,
    pub row: usize,
}

/// Rows of one table grouped under correlation keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedIssue {
    pub table: CinTable,
    pub columns: Vec<String>,
    pub rows: GroupedRows,
}

/// A population-level finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateIssue {
    pub rule_code: RuleCode,
    pub message: String,
}

/// The issues of the one shape a rule was classified under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedIssues {
    RowPointer(Vec<RowIssue>),
    SingleTableGroup(GroupedIssue),
    CrossTableGroup(Vec<GroupedIssue>),
    PartitionGroup(Vec<GroupedIssue>),
}

impl ClassifiedIssues {
    pub fn shape(&self) -> IssueShape {
        match self {
            Self::RowPointer(_) => IssueShape::RowPointer,
            Self::SingleTableGroup(_) => IssueShape::SingleTableGroup,
            Self::CrossTableGroup(_) => IssueShape::CrossTableGroup,
            Self::PartitionGroup(_) => IssueShape::PartitionGroup,
        }
    }

    /// Number of issue instances: pointers, or correlation keys summed over
    /// the grouped entries.
    pub fn count(&self) -> usize {
        match self {
            Self::RowPointer(issues) => issues.len(),
            Self::SingleTableGroup(group) => group.rows.len(),
            Self::CrossTableGroup(groups) | Self::PartitionGroup(groups) => {
                groups.iter().map(|group| group.rows.len()).sum()
            }
        }
    }
}
