//! Day-first date parsing and display helpers.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use wpr_model::DATE_FORMAT;

/// Short Portuguese weekday labels, Monday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["SEG", "TER", "QUA", "QUI", "SEX", "SAB", "DOM"];

/// Spreadsheet serial day numbers read as dates: 1954-10-03 ..= 2119-01-14.
const SERIAL_DAYS: std::ops::RangeInclusive<u32> = 20_000..=80_000;

/// Parses a date using the day-first convention.
///
/// Accepted shapes (separators `/`, `-` or `.`):
/// - `DD/MM/YYYY` and `DD/MM/YY` (two-digit years land in 2000..=2068 or 1969..=1999)
/// - `YYYY-MM-DD` (a four-digit leading part switches to year-first)
/// - spreadsheet serial numbers such as `45901` or `45901.5`, counted in days
///   from 1899-12-30; any fraction (time of day) is dropped
///
/// Any time-of-day suffix after a space or `T` is ignored.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use wpr_common::parse_date_day_first;
///
/// let expected = NaiveDate::from_ymd_opt(2025, 9, 1);
/// assert_eq!(parse_date_day_first("01/09/2025"), expected);
/// assert_eq!(parse_date_day_first("2025-09-01T08:30:00"), expected);
/// assert_eq!(parse_date_day_first("45901"), expected);
/// assert_eq!(parse_date_day_first("13/13/2025"), None);
/// ```
pub fn parse_date_day_first(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let date_part = trimmed
        .split(|c: char| c.is_whitespace() || c == 'T')
        .next()
        .unwrap_or(trimmed);
    if let Some(date) = parse_serial_date(date_part) {
        return Some(date);
    }
    let parts: Vec<&str> = date_part.split(['/', '-', '.']).collect();
    let [first, second, third] = parts.as_slice() else {
        return None;
    };
    if ![first, second, third]
        .iter()
        .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
    {
        return None;
    }
    if first.len() == 4 {
        let year: i32 = first.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, second.parse().ok()?, third.parse().ok()?);
    }
    let day: u32 = first.parse().ok()?;
    let month: u32 = second.parse().ok()?;
    let year = match third.len() {
        2 => expand_two_digit_year(third.parse().ok()?),
        4 => third.parse().ok()?,
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_serial_date(value: &str) -> Option<NaiveDate> {
    let (whole, fraction) = value.split_once('.').unwrap_or((value, "0"));
    if whole.is_empty()
        || !whole.chars().all(|c| c.is_ascii_digit())
        || !fraction.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }
    let days: u32 = whole.parse().ok()?;
    if !SERIAL_DAYS.contains(&days) {
        return None;
    }
    NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_days(Days::new(u64::from(days)))
}

fn expand_two_digit_year(yy: i32) -> i32 {
    if yy < 69 { 2000 + yy } else { 1900 + yy }
}

/// Formats a date as `DD/MM/YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn weekday_label(weekday: Weekday) -> &'static str {
    WEEKDAY_LABELS[weekday.num_days_from_monday() as usize]
}

/// Label for a zero-based weekday index; out-of-range indices yield `"?"`.
pub fn weekday_index_label(index: u32) -> &'static str {
    WEEKDAY_LABELS.get(index as usize).copied().unwrap_or("?")
}

/// Weekday label of a date.
pub fn date_weekday_label(date: NaiveDate) -> &'static str {
    weekday_label(date.weekday())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_first_is_preferred() {
        assert_eq!(parse_date_day_first("02/09/2025"), Some(date(2025, 9, 2)));
        assert_eq!(parse_date_day_first("02-09-2025"), Some(date(2025, 9, 2)));
        assert_eq!(parse_date_day_first("2.9.2025"), Some(date(2025, 9, 2)));
    }

    #[test]
    fn two_digit_years() {
        assert_eq!(parse_date_day_first("01/09/25"), Some(date(2025, 9, 1)));
        assert_eq!(parse_date_day_first("01/09/99"), Some(date(1999, 9, 1)));
    }

    #[test]
    fn time_suffix_ignored() {
        assert_eq!(
            parse_date_day_first("01/09/2025 17:45"),
            Some(date(2025, 9, 1))
        );
        assert_eq!(
            parse_date_day_first("2025-09-01 00:00:00"),
            Some(date(2025, 9, 1))
        );
    }

    #[test]
    fn spreadsheet_serials() {
        assert_eq!(parse_date_day_first("45901"), Some(date(2025, 9, 1)));
        assert_eq!(parse_date_day_first("45901.75"), Some(date(2025, 9, 1)));
        assert_eq!(parse_date_day_first("45658"), Some(date(2025, 1, 1)));
        assert_eq!(parse_date_day_first("3"), None);
        assert_eq!(parse_date_day_first("20250901"), None);
        assert_eq!(parse_date_day_first("45901.x"), None);
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(parse_date_day_first(""), None);
        assert_eq!(parse_date_day_first("ontem"), None);
        assert_eq!(parse_date_day_first("01/09"), None);
        assert_eq!(parse_date_day_first("31/02/2025"), None);
        assert_eq!(parse_date_day_first("1/9/202"), None);
    }

    #[test]
    fn labels() {
        assert_eq!(format_date(date(2025, 9, 1)), "01/09/2025");
        assert_eq!(date_weekday_label(date(2025, 9, 1)), "SEG");
        assert_eq!(date_weekday_label(date(2025, 9, 7)), "DOM");
        assert_eq!(weekday_index_label(4), "SEX");
        assert_eq!(weekday_index_label(9), "?");
    }
}
