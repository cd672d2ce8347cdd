//! Per-invocation accumulator that rules report violations into.

use cin_model::{CinTable, GroupedRows, RuleCode};

use crate::issue::{AggregateIssue, ClassifiedIssues, GroupedIssue, IssueShape, RowIssue};
use crate::rules::RuleDefinition;

/// Collects the issues one rule invocation reports.
///
/// A fresh context is created for every invocation and dropped once the
/// engine has classified it. Nothing is deduplicated: pushing the same
/// logical violation twice records it twice.
#[derive(Debug)]
pub struct RuleContext<'a> {
    definition: &'a RuleDefinition,
    row_issues: Vec<RowIssue>,
    single_table_group: Option<GroupedIssue>,
    cross_table_groups: Vec<GroupedIssue>,
    partition_groups: Vec<GroupedIssue>,
    aggregate_issues: Vec<AggregateIssue>,
}

impl<'a> RuleContext<'a> {
    pub fn new(definition: &'a RuleDefinition) -> Self {
        Self {
            definition,
            row_issues: Vec::new(),
            single_table_group: None,
            cross_table_groups: Vec::new(),
            partition_groups: Vec::new(),
            aggregate_issues: Vec::new(),
        }
    }

    /// The rule being executed.
    pub fn definition(&self) -> &'a RuleDefinition {
        self.definition
    }

    /// One pointer per row: a single field of a single table is invalid.
    pub fn push_row_issue<I>(&mut self, table: CinTable, column: &str, rows: I)
    where
        I: IntoIterator<Item = usize>,
    {
        self.row_issues.extend(rows.into_iter().map(|row| RowIssue {
            table,
            column: column.to_string(),
            row,
        }));
    }

    /// Related columns of one table, grouped by correlation key.
    ///
    /// Only one group is kept per invocation: a second call replaces the
    /// first.
    pub fn push_single_table_group(
        &mut self,
        table: CinTable,
        columns: &[&str],
        grouped_rows: GroupedRows,
    ) {
        self.single_table_group = Some(grouped_issue(table, columns, grouped_rows));
    }

    /// One table's share of a violation that spans several tables. Call once
    /// per participating table, using the same keys in each.
    pub fn push_cross_table_group(
        &mut self,
        table: CinTable,
        columns: &[&str],
        grouped_rows: GroupedRows,
    ) {
        self.cross_table_groups
            .push(grouped_issue(table, columns, grouped_rows));
    }

    /// Repeated occurrences within one table, grouped by a natural key such
    /// as the CIN episode.
    pub fn push_grouped_by_partition(
        &mut self,
        table: CinTable,
        columns: &[&str],
        grouped_rows: GroupedRows,
    ) {
        self.partition_groups
            .push(grouped_issue(table, columns, grouped_rows));
    }

    /// A finding about the whole data set rather than any row.
    pub fn push_aggregate_issue(&mut self, code: impl Into<RuleCode>, message: impl Into<String>) {
        self.aggregate_issues.push(AggregateIssue {
            rule_code: code.into(),
            message: message.into(),
        });
    }

    pub fn row_issues(&self) -> &[RowIssue] {
        &self.row_issues
    }

    pub fn single_table_group(&self) -> Option<&GroupedIssue> {
        self.single_table_group.as_ref()
    }

    pub fn cross_table_groups(&self) -> &[GroupedIssue] {
        &self.cross_table_groups
    }

    pub fn partition_groups(&self) -> &[GroupedIssue] {
        &self.partition_groups
    }

    pub fn aggregate_issues(&self) -> &[AggregateIssue] {
        &self.aggregate_issues
    }

    /// Instance counts per shape, in precedence order.
    pub fn shape_counts(&self) -> [(IssueShape, usize); 4] {
        [
            (IssueShape::RowPointer, self.row_issues.len()),
            (
                IssueShape::SingleTableGroup,
                self.single_table_group
                    .as_ref()
                    .map_or(0, |group| group.rows.len()),
            ),
            (
                IssueShape::CrossTableGroup,
                count_keys(&self.cross_table_groups),
            ),
            (IssueShape::PartitionGroup, count_keys(&self.partition_groups)),
        ]
    }

    /// Keeps the shape with the most instances (earlier shapes win ties)
    /// and returns it with the aggregate issues.
    ///
    /// Issues pushed through any other shape are dropped.
    pub fn into_classified(self) -> (Option<ClassifiedIssues>, Vec<AggregateIssue>) {
        let mut best: Option<(IssueShape, usize)> = None;
        for (shape, count) in self.shape_counts() {
            if count > best.map_or(0, |(_, top)| top) {
                best = Some((shape, count));
            }
        }

        let classified = best.and_then(|(shape, _)| match shape {
            IssueShape::RowPointer => Some(ClassifiedIssues::RowPointer(self.row_issues)),
            IssueShape::SingleTableGroup => self
                .single_table_group
                .map(ClassifiedIssues::SingleTableGroup),
            IssueShape::CrossTableGroup => {
                Some(ClassifiedIssues::CrossTableGroup(self.cross_table_groups))
            }
            IssueShape::PartitionGroup => {
                Some(ClassifiedIssues::PartitionGroup(self.partition_groups))
            }
            IssueShape::Aggregate => None,
        });

        (classified, self.aggregate_issues)
    }
}

fn grouped_issue(table: CinTable, columns: &[&str], rows: GroupedRows) -> GroupedIssue {
    GroupedIssue {
        table,
        columns: columns.iter().map(|c| (*c).to_string()).collect(),
        rows,
    }
}

fn count_keys(groups: &[GroupedIssue]) -> usize {
    groups.iter().map(|group| group.rows.len()).sum()
}
