//! Shared utilities for the CIN validator crates.
//!
//! Cell conversion helpers for Polars `AnyValue` and census date arithmetic.

pub mod dates;
pub mod values;

pub use dates::{census_period, format_key_date, parse_date};
pub use values::{any_to_string, any_to_text, format_numeric};
