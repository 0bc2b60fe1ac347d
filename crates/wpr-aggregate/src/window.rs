//! Calendar window resolution (year scope, mode, ISO week override).

use chrono::{Datelike, NaiveDate};
use tracing::warn;
use wpr_model::{PeriodMode, PeriodWarning, PeriodWindow};

use crate::query::PeriodQuery;

/// Resolves the window a query covers, plus any soft warnings.
///
/// An inverted explicit range is swapped. A nonexistent ISO week keeps the
/// window computed before the override.
pub fn resolve_window(query: &PeriodQuery) -> (PeriodWindow, Vec<PeriodWarning>) {
    let mut warnings = Vec::new();
    let range = query.range.map(|(start, end)| {
        if start > end {
            warn!(%start, %end, "inverted range, swapping bounds");
            warnings.push(PeriodWarning::InvertedRange { start, end });
            (end, start)
        } else {
            (start, end)
        }
    });

    let mut window = match query.mode {
        PeriodMode::Weekly => {
            PeriodWindow::weekly(range.map_or(query.reference, |(start, _)| start))
        }
        PeriodMode::Monthly => PeriodWindow::monthly(query.reference),
        PeriodMode::Yearly => {
            let year = query.year.year().unwrap_or_else(|| query.reference.year());
            PeriodWindow::yearly(year).unwrap_or_else(|| PeriodWindow::weekly(query.reference))
        }
        PeriodMode::Custom => {
            let (start, end) = range.unwrap_or((query.reference, query.reference));
            ordered(start, end)
        }
    };

    if query.mode == PeriodMode::Weekly
        && let Some(week) = query.iso_week
    {
        let year = query.year.year().unwrap_or_else(|| window.start.year());
        match PeriodWindow::iso_week(year, week) {
            Some(iso) => window = iso,
            None => {
                warn!(year, week, "ISO week out of range, keeping previous window");
                warnings.push(PeriodWarning::IsoWeekOutOfRange { year, week });
            }
        }
    }

    (window, warnings)
}

fn ordered(start: NaiveDate, end: NaiveDate) -> PeriodWindow {
    PeriodWindow::new(start.min(end), start.max(end)).unwrap_or_else(|_| PeriodWindow::weekly(start))
}

#[cfg(test)]
mod tests {
    use wpr_model::YearScope;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekly_uses_range_start() {
        let query = PeriodQuery::new(date(2025, 1, 15)).with_range(date(2025, 9, 3), date(2025, 9, 20));
        let (window, warnings) = resolve_window(&query);
        assert_eq!((window.start, window.end), (date(2025, 9, 1), date(2025, 9, 5)));
        assert!(warnings.is_empty());
    }

    #[test]
    fn inverted_custom_range_is_swapped() {
        let query = PeriodQuery::new(date(2025, 9, 1))
            .with_mode(PeriodMode::Custom)
            .with_range(date(2025, 9, 10), date(2025, 9, 2));
        let (window, warnings) = resolve_window(&query);
        assert_eq!((window.start, window.end), (date(2025, 9, 2), date(2025, 9, 10)));
        assert_eq!(
            warnings,
            vec![PeriodWarning::InvertedRange {
                start: date(2025, 9, 10),
                end: date(2025, 9, 2)
            }]
        );
    }

    #[test]
    fn iso_week_overrides_weekly_window() {
        let query = PeriodQuery::new(date(2025, 1, 15))
            .with_year(YearScope::Year(2025))
            .with_iso_week(36);
        let (window, _) = resolve_window(&query);
        assert_eq!(window.start, date(2025, 9, 1));
    }

    #[test]
    fn iso_week_ignored_outside_weekly_mode() {
        let query = PeriodQuery::new(date(2025, 2, 10))
            .with_mode(PeriodMode::Monthly)
            .with_iso_week(60);
        let (window, warnings) = resolve_window(&query);
        assert_eq!(window.start, date(2025, 2, 1));
        assert!(warnings.is_empty());
    }

    #[test]
    fn yearly_follows_scope() {
        let query = PeriodQuery::new(date(2025, 6, 1))
            .with_mode(PeriodMode::Yearly)
            .with_year(YearScope::Year(2024));
        let (window, _) = resolve_window(&query);
        assert_eq!((window.start, window.end), (date(2024, 1, 1), date(2024, 12, 31)));
    }
}
