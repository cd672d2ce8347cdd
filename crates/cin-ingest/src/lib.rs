//! Loads CIN census data into a validation [`cin_model::Snapshot`].

pub mod discovery;
pub mod error;
pub mod loader;

pub use discovery::{DiscoveredTables, discover_tables, list_csv_files, match_table};
pub use error::{IngestError, Result};
pub use loader::{load_snapshot, read_table};
