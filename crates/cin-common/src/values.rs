//! Polars `AnyValue` helpers.
//!
//! Census tables carry every field as text, but frames built elsewhere may
//! hold numbers. Cells are read as trimmed strings with `None` standing for
//! the absent marker.

use polars::prelude::AnyValue;

/// Renders a cell as text. `Null` becomes an empty string and floats lose
/// trailing zeros, so `1.0` and `"1"` read the same.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use cin_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Int32(42)), "42");
/// assert_eq!(any_to_string(AnyValue::String("child1")), "child1");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        other => other.to_string(),
    }
}

/// Trimmed cell text, or `None` when the cell is null or blank.
pub fn any_to_text(value: AnyValue<'_>) -> Option<String> {
    let text = any_to_string(value);
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Formats a float without trailing zeros (`2.50` → `"2.5"`, `3.0` → `"3"`).
pub fn format_numeric(v: f64) -> String {
    let s = v.to_string();
    if !s.contains('.') {
        return s;
    }
    match s.trim_end_matches('0').trim_end_matches('.') {
        "" | "-" => "0".to_string(),
        trimmed => trimmed.to_string(),
    }
}
