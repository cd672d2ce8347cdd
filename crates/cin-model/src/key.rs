//! Correlation keys for logical violation instances.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use cin_common::format_key_date;

/// Rendering of the absent marker inside a key.
pub const ABSENT_MARKER: &str = "NA";

/// Tuple of field values identifying one logical violation ("ERROR_ID").
///
/// The same key can group rows from several tables, which is how one
/// violation is traced across tables. `None` is the explicit absent marker.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorId(Vec<Option<String>>);

impl ErrorId {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a text value; blank text counts as absent.
    #[must_use]
    pub fn text(mut self, value: Option<&str>) -> Self {
        let value = value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        self.0.push(value);
        self
    }

    /// Appends a date value, stored in ISO form.
    #[must_use]
    pub fn date(mut self, value: Option<NaiveDate>) -> Self {
        self.0.push(value.map(format_key_date));
        self
    }

    pub fn values(&self) -> &[Option<String>] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Option<String>>> for ErrorId {
    fn from(values: Vec<Option<String>>) -> Self {
        Self(values)
    }
}

impl fmt::Display for ErrorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, value) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            f.write_str(value.as_deref().unwrap_or(ABSENT_MARKER))?;
        }
        Ok(())
    }
}

impl FromStr for ErrorId {
    type Err = Infallible;

    /// Parses the `"a, b, c"` form shown to users; `NA` or an empty element
    /// is the absent marker.
    ///
    /// The form is lossy: a value containing `,` or equal to `NA` does not
    /// survive a `Display` round trip.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(str::trim)
            .map(|part| {
                if part.is_empty() || part == ABSENT_MARKER {
                    None
                } else {
                    Some(part.to_string())
                }
            })
            .collect();
        Ok(Self(values))
    }
}
