use thiserror::Error;

use crate::table::CinTable;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown CIN table: {0}")]
    UnknownTable(String),
    #[error("invalid rule code: {0:?}")]
    InvalidRuleCode(String),
}

/// A rule could not find what it expected in the snapshot.
///
/// The engine reports these as malformed-snapshot errors rather than as
/// generic rule failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("table {table} is missing from the snapshot")]
    MissingTable { table: CinTable },
    #[error("column {column} is missing from table {table}")]
    MissingColumn { table: CinTable, column: String },
    #[error("{table}.{column} has no usable value at row {row}")]
    MissingValue {
        table: CinTable,
        column: String,
        row: usize,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
