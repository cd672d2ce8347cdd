//! Reading per-table CSV files into a [`Snapshot`].

use std::collections::BTreeMap;
use std::path::Path;

use csv::ReaderBuilder;
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use tracing::{debug, info, info_span};

use cin_model::{CinTable, Snapshot};

use crate::discovery::discover_tables;
use crate::error::{IngestError, Result};

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn normalize_cell(raw: &str) -> Option<String> {
    let value = raw.trim().trim_matches('\u{feff}');
    (!value.is_empty()).then(|| value.to_string())
}

/// Reads one CSV into `table`'s fixed column set.
///
/// Header names match ignoring case. Columns the file lacks become all-null;
/// columns the table does not define are dropped. Blank cells are null, and
/// every value is kept as text.
pub fn read_table(path: &Path, table: CinTable) -> Result<DataFrame> {
    let csv_error = |source: csv::Error| IngestError::CsvRead {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(normalize_header)
        .collect();

    let mut positions: BTreeMap<&'static str, usize> = BTreeMap::new();
    for (idx, header) in headers.iter().enumerate() {
        match table
            .columns()
            .iter()
            .find(|column| column.eq_ignore_ascii_case(header))
        {
            Some(column) => {
                positions.entry(*column).or_insert(idx);
            }
            None => debug!(%table, column = %header, "dropping column not in table definition"),
        }
    }

    let mut values: Vec<Vec<Option<String>>> = vec![Vec::new(); table.columns().len()];
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        for (slot, column) in values.iter_mut().zip(table.columns()) {
            let cell = positions
                .get(column)
                .and_then(|idx| record.get(*idx))
                .and_then(normalize_cell);
            slot.push(cell);
        }
    }

    let cols: Vec<Column> = table
        .columns()
        .iter()
        .zip(values)
        .map(|(name, column_values)| Series::new((*name).into(), column_values).into_column())
        .collect();
    DataFrame::new(cols).map_err(|e| IngestError::DataFrame {
        table,
        message: e.to_string(),
    })
}

/// Loads a census folder with one CSV per table (`Header.csv`,
/// `CINdetails.csv`, ...).
///
/// Tables without a file are present with zero rows, so rules always see the
/// full table set.
pub fn load_snapshot(dir: &Path) -> Result<Snapshot> {
    let span = info_span!("ingest", dir = %dir.display());
    let _guard = span.enter();

    let discovered = discover_tables(dir)?;
    let mut snapshot = Snapshot::empty();
    for (table, path) in &discovered.tables {
        let df = read_table(path, *table)?;
        debug!(%table, rows = df.height(), path = %path.display(), "loaded table");
        snapshot.insert(*table, df);
    }

    info!(
        tables = discovered.tables.len(),
        skipped = discovered.unmatched.len(),
        "loaded census folder"
    );
    Ok(snapshot)
}
