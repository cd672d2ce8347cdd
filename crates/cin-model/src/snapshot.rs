//! The per-run collection of normalized CIN tables.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use polars::prelude::{AnyValue, Column, DataFrame, IntoColumn, NamedFrom, Series};

use cin_common::{any_to_text, parse_date};

use crate::error::SnapshotError;
use crate::table::{CinTable, columns};

/// Table identifier → DataFrame, supplied once per validation run.
///
/// Row positions are the 0-based DataFrame row indices and are the unit of
/// location reporting. Cloning is cheap: Polars columns are copy-on-write, so
/// a clone can be mutated without the original observing it.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    tables: BTreeMap<CinTable, DataFrame>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot with every CIN table present, full column sets, zero rows.
    pub fn empty() -> Self {
        let tables = CinTable::all()
            .iter()
            .map(|table| (*table, empty_table(*table)))
            .collect();
        Self { tables }
    }

    /// Inserts or replaces a table, returning the previous frame.
    pub fn insert(&mut self, table: CinTable, df: DataFrame) -> Option<DataFrame> {
        self.tables.insert(table, df)
    }

    #[must_use]
    pub fn with_table(mut self, table: CinTable, df: DataFrame) -> Self {
        self.insert(table, df);
        self
    }

    pub fn contains(&self, table: CinTable) -> bool {
        self.tables.contains_key(&table)
    }

    pub fn table(&self, table: CinTable) -> Result<&DataFrame, SnapshotError> {
        self.tables
            .get(&table)
            .ok_or(SnapshotError::MissingTable { table })
    }

    pub fn table_mut(&mut self, table: CinTable) -> Result<&mut DataFrame, SnapshotError> {
        self.tables
            .get_mut(&table)
            .ok_or(SnapshotError::MissingTable { table })
    }

    pub fn tables(&self) -> impl Iterator<Item = (CinTable, &DataFrame)> {
        self.tables.iter().map(|(table, df)| (*table, df))
    }

    /// Number of rows in `table`.
    pub fn height(&self, table: CinTable) -> Result<usize, SnapshotError> {
        Ok(self.table(table)?.height())
    }

    pub fn column(&self, table: CinTable, column: &str) -> Result<&Column, SnapshotError> {
        self.table(table)?
            .column(column)
            .map_err(|_| SnapshotError::MissingColumn {
                table,
                column: column.to_string(),
            })
    }

    /// Trimmed text values of a column, one per row; blanks are `None`.
    pub fn text_values(
        &self,
        table: CinTable,
        column: &str,
    ) -> Result<Vec<Option<String>>, SnapshotError> {
        let series = self.column(table, column)?;
        Ok((0..series.len())
            .map(|idx| any_to_text(series.get(idx).unwrap_or(AnyValue::Null)))
            .collect())
    }

    /// Date values of a column, one per row.
    ///
    /// Values that are absent or do not parse as a date become `None`.
    pub fn date_values(
        &self,
        table: CinTable,
        column: &str,
    ) -> Result<Vec<Option<NaiveDate>>, SnapshotError> {
        Ok(self
            .text_values(table, column)?
            .into_iter()
            .map(|value| value.as_deref().and_then(parse_date))
            .collect())
    }

    /// The census reference date from the first Header row.
    pub fn reference_date(&self) -> Result<NaiveDate, SnapshotError> {
        self.date_values(CinTable::Header, columns::REFERENCE_DATE)?
            .into_iter()
            .next()
            .flatten()
            .ok_or_else(|| SnapshotError::MissingValue {
                table: CinTable::Header,
                column: columns::REFERENCE_DATE.to_string(),
                row: 0,
            })
    }
}

fn empty_table(table: CinTable) -> DataFrame {
    let cols: Vec<Column> = table
        .columns()
        .iter()
        .map(|name| Series::new((*name).into(), Vec::<Option<String>>::new()).into_column())
        .collect();
    DataFrame::new(cols).unwrap_or_else(|_| DataFrame::empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_df(name: &str, values: Vec<Option<&str>>) -> DataFrame {
        let values: Vec<Option<String>> = values
            .into_iter()
            .map(|v| v.map(String::from))
            .collect();
        DataFrame::new(vec![Series::new(name.into(), values).into_column()]).expect("frame")
    }

    #[test]
    fn test_empty_snapshot_has_every_table() {
        let snapshot = Snapshot::empty();
        for table in CinTable::all() {
            let df = snapshot.table(*table).expect("table present");
            assert_eq!(df.height(), 0);
            assert_eq!(df.width(), table.columns().len());
        }
    }

    #[test]
    fn test_missing_table_and_column_are_reported() {
        let snapshot = Snapshot::new().with_table(
            CinTable::Disabilities,
            text_df(columns::DISABILITY, vec![Some("NONE")]),
        );

        assert_eq!(
            snapshot.table(CinTable::Reviews).err(),
            Some(SnapshotError::MissingTable {
                table: CinTable::Reviews
            })
        );
        assert_eq!(
            snapshot
                .column(CinTable::Disabilities, columns::LA_CHILD_ID)
                .err(),
            Some(SnapshotError::MissingColumn {
                table: CinTable::Disabilities,
                column: columns::LA_CHILD_ID.to_string(),
            })
        );
    }

    #[test]
    fn test_text_and_date_values() {
        let snapshot = Snapshot::new().with_table(
            CinTable::CinPlanDates,
            text_df(
                columns::CIN_PLAN_END_DATE,
                vec![Some("01/04/2021"), None, Some(" "), Some("garbage")],
            ),
        );

        let texts = snapshot
            .text_values(CinTable::CinPlanDates, columns::CIN_PLAN_END_DATE)
            .expect("texts");
        assert_eq!(
            texts,
            vec![Some("01/04/2021".to_string()), None, None, Some("garbage".to_string())]
        );

        let dates = snapshot
            .date_values(CinTable::CinPlanDates, columns::CIN_PLAN_END_DATE)
            .expect("dates");
        assert_eq!(dates, vec![NaiveDate::from_ymd_opt(2021, 4, 1), None, None, None]);
    }

    #[test]
    fn test_reference_date_from_header() {
        let snapshot = Snapshot::new().with_table(
            CinTable::Header,
            text_df(columns::REFERENCE_DATE, vec![Some("31/03/2022")]),
        );
        assert_eq!(
            snapshot.reference_date().ok(),
            NaiveDate::from_ymd_opt(2022, 3, 31)
        );

        let blank = Snapshot::new().with_table(
            CinTable::Header,
            text_df(columns::REFERENCE_DATE, vec![None]),
        );
        assert!(matches!(
            blank.reference_date(),
            Err(SnapshotError::MissingValue { row: 0, .. })
        ));
    }

    #[test]
    fn test_clones_are_independent() {
        let original = Snapshot::new().with_table(
            CinTable::Disabilities,
            text_df(columns::DISABILITY, vec![Some("NONE")]),
        );
        let mut copy = original.clone();
        copy.insert(
            CinTable::Disabilities,
            text_df(columns::DISABILITY, vec![Some("AUT"), Some("HAND")]),
        );

        assert_eq!(original.height(CinTable::Disabilities).ok(), Some(1));
        assert_eq!(copy.height(CinTable::Disabilities).ok(), Some(2));
    }
}
