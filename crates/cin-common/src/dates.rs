//! Census date handling.
//!
//! Source files carry dates as `dd/mm/yyyy`; normalized tables may already
//! hold ISO `yyyy-mm-dd`. Both are accepted, and any time suffix is dropped.

use chrono::{Months, NaiveDate};

const UK_DATE_FORMAT: &str = "%d/%m/%Y";
const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a census date, returning `None` for blank or unparseable input.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use cin_common::parse_date;
///
/// let expected = NaiveDate::from_ymd_opt(2022, 3, 31);
/// assert_eq!(parse_date("31/03/2022"), expected);
/// assert_eq!(parse_date("2022-03-31"), expected);
/// assert_eq!(parse_date("2022-03-31T10:15:00"), expected);
/// assert_eq!(parse_date("not a date"), None);
/// ```
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let date_part = trimmed
        .split(['T', ' '])
        .next()
        .unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, UK_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(date_part, ISO_DATE_FORMAT))
        .ok()
}

/// Renders a date the way correlation keys store it (ISO, sortable).
pub fn format_key_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Returns `(collection_start, reference_date)` for a census reference date.
///
/// The collection period runs from the day after the reference date one year
/// earlier, up to and including the reference date itself.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use cin_common::census_period;
///
/// let reference = NaiveDate::from_ymd_opt(2022, 3, 31).unwrap();
/// let (start, end) = census_period(reference);
/// assert_eq!(start, NaiveDate::from_ymd_opt(2021, 4, 1).unwrap());
/// assert_eq!(end, reference);
/// ```
pub fn census_period(reference_date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let year_before = reference_date
        .checked_sub_months(Months::new(12))
        .unwrap_or(NaiveDate::MIN);
    let start = year_before.succ_opt().unwrap_or(year_before);
    (start, reference_date)
}
