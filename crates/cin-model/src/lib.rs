//! Data model for CIN census validation.
//!
//! Table identifiers, the per-run [`Snapshot`], rule codes and the
//! correlation keys ([`ErrorId`]) that tie one violation to its rows.

pub mod error;
pub mod grouping;
pub mod ids;
pub mod key;
pub mod snapshot;
pub mod table;

pub use error::{ModelError, Result, SnapshotError};
pub use grouping::{GroupedRows, RowGroup};
pub use ids::RuleCode;
pub use key::{ABSENT_MARKER, ErrorId};
pub use snapshot::Snapshot;
pub use table::{CinTable, columns};
