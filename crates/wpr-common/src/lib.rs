//! Shared utilities for the weekly productivity report crates.
//!
//! Polars `AnyValue` conversions, day-first date parsing, lenient count
//! parsing, log redaction and the small text helpers every stage agrees on.

pub mod dates;
pub mod numbers;
pub mod polars;
pub mod redact;
pub mod text;

pub use dates::{
    WEEKDAY_LABELS, date_weekday_label, format_date, parse_date_day_first, weekday_index_label,
    weekday_label,
};
pub use numbers::parse_count;
pub use polars::{any_to_string, column_strings, format_numeric};
pub use redact::{REDACTED_VALUE, log_data_enabled, redact_value, set_log_data};
pub use text::{collapse_whitespace, normalize_label};
