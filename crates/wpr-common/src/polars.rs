//! Polars AnyValue utility functions.
//!
//! Every ingested table is handled as text, so most of the pipeline only needs
//! to turn cells back into strings and, for counts, into numbers.

use polars::prelude::{AnyValue, DataFrame};

/// Converts a Polars `AnyValue` to a `String` representation.
///
/// Returns an empty string for `Null`, formats numeric types without
/// unnecessary trailing zeros.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use wpr_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Int32(42)), "42");
/// assert_eq!(any_to_string(AnyValue::String("ana")), "ana");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => {
            let s = other.to_string();
            if s.starts_with('"') && s.ends_with('"') && s.len() >= 2 {
                s[1..s.len() - 1].to_string()
            } else {
                s
            }
        }
    }
}

/// Formats a floating-point number without trailing zeros after the decimal point.
///
/// # Examples
///
/// ```
/// use wpr_common::format_numeric;
///
/// assert_eq!(format_numeric(3.0), "3");
/// assert_eq!(format_numeric(2.50), "2.5");
/// assert_eq!(format_numeric(40.0), "40");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    } else {
        s
    }
}

/// Reads every cell of the column at `index` as a string.
///
/// Returns `None` when the frame has no such column.
pub fn column_strings(df: &DataFrame, index: usize) -> Option<Vec<String>> {
    let column = df.get_columns().get(index)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(any_to_string(column.get(idx).unwrap_or(AnyValue::Null)));
    }
    Some(values)
}

#[cfg(test)]
mod tests {
    use polars::prelude::{Column, IntoColumn, NamedFrom, Series};

    use super::*;

    #[test]
    fn test_any_to_string_null() {
        assert_eq!(any_to_string(AnyValue::Null), "");
    }

    #[test]
    fn test_any_to_string_floats() {
        assert_eq!(any_to_string(AnyValue::Float64(1.5)), "1.5");
        assert_eq!(any_to_string(AnyValue::Float64(1.0)), "1");
    }

    #[test]
    fn test_column_strings() {
        let columns: Vec<Column> = vec![
            Series::new("Data".into(), vec!["01/09/2025", "02/09/2025"]).into_column(),
            Series::new("Notas".into(), vec![3i64, 4]).into_column(),
        ];
        let df = DataFrame::new(columns).unwrap();
        assert_eq!(
            column_strings(&df, 1),
            Some(vec!["3".to_string(), "4".to_string()])
        );
        assert_eq!(column_strings(&df, 5), None);
    }
}
