//! Period windows and the soft warnings produced while computing them.

use std::fmt;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Display format for dates in tables and exports.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// How the period window is derived from the reference date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodMode {
    /// Monday..Friday of the ISO week containing the reference date.
    #[default]
    Weekly,
    /// First..last day of the reference month.
    Monthly,
    /// The whole scoped year.
    Yearly,
    /// An explicit calendar range.
    Custom,
}

/// Calendar-year restriction applied before any other filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YearScope {
    #[default]
    All,
    Year(i32),
}

impl YearScope {
    pub fn contains(self, date: NaiveDate) -> bool {
        match self {
            YearScope::All => true,
            YearScope::Year(year) => date.year() == year,
        }
    }

    pub fn year(self) -> Option<i32> {
        match self {
            YearScope::All => None,
            YearScope::Year(year) => Some(year),
        }
    }
}

impl From<Option<i32>> for YearScope {
    fn from(value: Option<i32>) -> Self {
        value.map_or(YearScope::All, YearScope::Year)
    }
}

/// Closed date interval `[start, end]` under analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Restrict charts and tables to Monday..Friday.
    pub weekdays_only: bool,
}

impl PeriodWindow {
    /// Builds a window from an explicit range.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvertedRange`] when `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(ModelError::InvertedRange { start, end });
        }
        Ok(Self {
            start,
            end,
            weekdays_only: true,
        })
    }

    /// Monday..Friday of the ISO week containing `reference`.
    pub fn weekly(reference: NaiveDate) -> Self {
        let start = monday_of(reference);
        Self {
            start,
            end: start + Days::new(4),
            weekdays_only: true,
        }
    }

    /// Monday..Friday of ISO week `week` of ISO year `year`, if that week exists.
    pub fn iso_week(year: i32, week: u32) -> Option<Self> {
        let start = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)?;
        let end = NaiveDate::from_isoywd_opt(year, week, Weekday::Fri)?;
        Some(Self {
            start,
            end,
            weekdays_only: true,
        })
    }

    /// First..last day of the month containing `reference`.
    pub fn monthly(reference: NaiveDate) -> Self {
        let start = reference.with_day(1).unwrap_or(reference);
        let end = start
            .checked_add_months(chrono::Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(reference);
        Self {
            start,
            end,
            weekdays_only: true,
        }
    }

    /// January 1st..December 31st of `year`.
    pub fn yearly(year: i32) -> Option<Self> {
        Some(Self {
            start: NaiveDate::from_ymd_opt(year, 1, 1)?,
            end: NaiveDate::from_ymd_opt(year, 12, 31)?,
            weekdays_only: true,
        })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Dates inside the window that survive the weekday restriction.
    pub fn days(&self) -> Vec<NaiveDate> {
        self.start
            .iter_days()
            .take_while(|day| *day <= self.end)
            .filter(|day| !self.weekdays_only || day.weekday().num_days_from_monday() < 5)
            .collect()
    }

    /// Human-readable span, e.g. `01/09/2025 a 05/09/2025`.
    pub fn label(&self) -> String {
        format!(
            "{} a {}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

/// Monday of the ISO week containing `date`.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date - Days::new(offset)
}

/// Non-fatal problem detected while computing a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PeriodWarning {
    /// The requested ISO week does not exist in the year; the previous range was kept.
    IsoWeekOutOfRange { year: i32, week: u32 },
    /// The explicit range was given end-first and has been swapped.
    InvertedRange { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for PeriodWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IsoWeekOutOfRange { year, week } => write!(
                f,
                "ISO week {week} does not exist in {year}; keeping the previous range"
            ),
            Self::InvertedRange { start, end } => write!(
                f,
                "range start {} is after end {}; the bounds were swapped",
                start.format(DATE_FORMAT),
                end.format(DATE_FORMAT)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekly_window_is_monday_to_friday() {
        let window = PeriodWindow::weekly(date(2025, 9, 4));
        assert_eq!(window.start, date(2025, 9, 1));
        assert_eq!(window.end, date(2025, 9, 5));
        assert_eq!(window.days().len(), 5);
    }

    #[test]
    fn weekly_window_from_sunday_uses_previous_monday() {
        let window = PeriodWindow::weekly(date(2025, 9, 7));
        assert_eq!(window.start, date(2025, 9, 1));
    }

    #[test]
    fn iso_week_53_only_in_long_years() {
        assert!(PeriodWindow::iso_week(2020, 53).is_some());
        assert!(PeriodWindow::iso_week(2025, 53).is_none());
        let window = PeriodWindow::iso_week(2025, 36).unwrap();
        assert_eq!(window.start, date(2025, 9, 1));
        assert_eq!(window.end, date(2025, 9, 5));
    }

    #[test]
    fn monthly_window_covers_month() {
        let window = PeriodWindow::monthly(date(2024, 2, 14));
        assert_eq!(window.start, date(2024, 2, 1));
        assert_eq!(window.end, date(2024, 2, 29));
        assert_eq!(window.days().len(), 21);
    }

    #[test]
    fn inverted_range_rejected() {
        let err = PeriodWindow::new(date(2025, 9, 5), date(2025, 9, 1)).unwrap_err();
        assert!(matches!(err, ModelError::InvertedRange { .. }));
    }

    #[test]
    fn label_uses_day_first_format() {
        let window = PeriodWindow::weekly(date(2025, 9, 1));
        assert_eq!(window.label(), "01/09/2025 a 05/09/2025");
    }
}
