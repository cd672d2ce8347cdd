//! CSV discovery and table matching.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::warn;

use cin_model::CinTable;

use crate::error::{IngestError, Result};

/// CSV files of a census folder, matched to tables by file stem.
#[derive(Debug, Clone, Default)]
pub struct DiscoveredTables {
    pub tables: BTreeMap<CinTable, PathBuf>,
    /// CSV files whose stem names no CIN table.
    pub unmatched: Vec<PathBuf>,
}

/// Lists all CSV files in a directory, sorted by filename.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Table named by a file stem, ignoring case (`cindetails.csv` → CINdetails).
pub fn match_table(path: &Path) -> Option<CinTable> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(|stem| stem.trim().parse().ok())
}

/// Matches every CSV in `dir` to a table. Two files for one table is an error.
pub fn discover_tables(dir: &Path) -> Result<DiscoveredTables> {
    let mut discovered = DiscoveredTables::default();
    for path in list_csv_files(dir)? {
        let Some(table) = match_table(&path) else {
            warn!(path = %path.display(), "skipping CSV that names no CIN table");
            discovered.unmatched.push(path);
            continue;
        };
        if let Some(first) = discovered.tables.get(&table) {
            return Err(IngestError::DuplicateTable {
                table,
                first: first.clone(),
                second: path,
            });
        }
        discovered.tables.insert(table, path);
    }
    Ok(discovered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_dir(files: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in files {
            fs::write(dir.path().join(name), "LAchildID\n").unwrap();
        }
        fs::create_dir(dir.path().join("nested.csv")).unwrap();
        dir
    }

    #[test]
    fn test_list_csv_files() {
        let dir = create_test_dir(&["Header.csv", "notes.txt", "Reviews.CSV"]);
        let files = list_csv_files(dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["Header.csv", "Reviews.CSV"]);
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent");
        assert!(matches!(
            list_csv_files(&missing),
            Err(IngestError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn test_match_table() {
        assert_eq!(
            match_table(Path::new("data/cindetails.csv")),
            Some(CinTable::CinDetails)
        );
        assert_eq!(
            match_table(Path::new("CINplanDates.csv")),
            Some(CinTable::CinPlanDates)
        );
        assert_eq!(match_table(Path::new("summary.csv")), None);
    }

    #[test]
    fn test_discover_tables() {
        let dir = create_test_dir(&["Header.csv", "Section47.csv", "extra.csv"]);
        let discovered = discover_tables(dir.path()).unwrap();
        assert_eq!(
            discovered.tables.keys().copied().collect::<Vec<_>>(),
            [CinTable::Header, CinTable::Section47]
        );
        assert_eq!(discovered.unmatched.len(), 1);
    }

    #[test]
    fn test_duplicate_table_files() {
        let dir = create_test_dir(&["Header.csv", " header.csv"]);
        assert!(matches!(
            discover_tables(dir.path()),
            Err(IngestError::DuplicateTable {
                table: CinTable::Header,
                ..
            })
        ));
    }
}
