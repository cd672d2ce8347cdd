//! Error types for CIN data ingestion.

use std::path::PathBuf;

use thiserror::Error;

use cin_model::CinTable;

/// Errors that can occur while loading a census folder.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to open or parse a CSV file.
    #[error("failed to read CSV {path}: {source}")]
    CsvRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Two files in the folder map to the same table.
    #[error("table {table} is supplied by both {first} and {second}")]
    DuplicateTable {
        table: CinTable,
        first: PathBuf,
        second: PathBuf,
    },

    /// Failed to build the table's DataFrame.
    #[error("failed to build table {table}: {message}")]
    DataFrame { table: CinTable, message: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
