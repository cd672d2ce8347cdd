//! Row indices grouped under correlation keys.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::key::ErrorId;

/// Correlation key → row indices of one table.
///
/// Keys iterate in sorted order and each row list keeps insertion order, so
/// two runs over the same data produce the same grouping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<RowGroup>", from = "Vec<RowGroup>")]
pub struct GroupedRows {
    groups: BTreeMap<ErrorId, Vec<usize>>,
}

/// Serialized form of one group (`ERROR_ID`, `ROW_ID` list).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowGroup {
    pub error_id: ErrorId,
    pub rows: Vec<usize>,
}

impl From<GroupedRows> for Vec<RowGroup> {
    fn from(grouped: GroupedRows) -> Self {
        grouped
            .groups
            .into_iter()
            .map(|(error_id, rows)| RowGroup { error_id, rows })
            .collect()
    }
}

impl From<Vec<RowGroup>> for GroupedRows {
    fn from(groups: Vec<RowGroup>) -> Self {
        let mut grouped = Self::new();
        for group in groups {
            for row in group.rows {
                grouped.push(group.error_id.clone(), row);
            }
        }
        grouped
    }
}

impl GroupedRows {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `row` under `key`. A row already listed under the key is ignored.
    pub fn push(&mut self, key: ErrorId, row: usize) {
        let rows = self.groups.entry(key).or_default();
        if !rows.contains(&row) {
            rows.push(row);
        }
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of row indices across all keys.
    pub fn row_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn get(&self, key: &ErrorId) -> Option<&[usize]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    pub fn keys(&self) -> impl Iterator<Item = &ErrorId> {
        self.groups.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ErrorId, &[usize])> {
        self.groups.iter().map(|(key, rows)| (key, rows.as_slice()))
    }
}

impl FromIterator<(ErrorId, usize)> for GroupedRows {
    fn from_iter<I: IntoIterator<Item = (ErrorId, usize)>>(iter: I) -> Self {
        let mut grouped = Self::new();
        for (key, row) in iter {
            grouped.push(key, row);
        }
        grouped
    }
}
