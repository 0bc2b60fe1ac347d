//! The aggregation pass.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, info};
use wpr_common::normalize_label;
use wpr_model::{AggregateResult, ChartPoint, DailyTotal, NormalizedRecord};

use crate::filter::LabelFilter;
use crate::query::PeriodQuery;
use crate::top::{known_collaborators, rank_totals, top_collaborators};
use crate::window::resolve_window;

/// Aggregates `records` for `query`.
///
/// Year scope first, then the calendar window, attribute filters and the
/// Monday..Friday restriction. The period figures use the fully filtered set;
/// the year figures use only the year scope.
pub fn aggregate(records: &[NormalizedRecord], query: &PeriodQuery) -> AggregateResult {
    let (window, warnings) = resolve_window(query);
    let types = LabelFilter::new(&query.types);
    let localities = LabelFilter::new(&query.localities);

    let year_scoped: Vec<&NormalizedRecord> = records
        .iter()
        .filter(|record| query.year.contains(record.date))
        .collect();
    let filtered: Vec<&NormalizedRecord> = year_scoped
        .iter()
        .copied()
        .filter(|record| window.contains(record.date))
        .filter(|record| types.matches(&record.kind) && localities.matches(&record.locality))
        .filter(|record| record.is_business_day())
        .collect();

    let period_totals = rank_totals(filtered.iter().copied());
    let selected = match &query.collaborators {
        Some(names) => dedup_names(names),
        None => top_collaborators(&period_totals, &known_collaborators(records), query.top_n),
    };

    let mut sums: BTreeMap<(u32, &str), u64> = BTreeMap::new();
    let mut daily: BTreeMap<(NaiveDate, &str), u64> = BTreeMap::new();
    for record in &filtered {
        let Some(name) = record.collaborator.as_deref() else {
            continue;
        };
        *sums.entry((record.weekday_index(), name)).or_default() += u64::from(record.count);
        *daily.entry((record.date, name)).or_default() += u64::from(record.count);
    }

    let grid = selected
        .iter()
        .flat_map(|name| {
            let sums = &sums;
            (0..5).map(move |weekday| ChartPoint {
                weekday,
                collaborator: name.clone(),
                count: sums.get(&(weekday, name.as_str())).copied().unwrap_or(0),
            })
        })
        .collect();

    let daily = daily
        .into_iter()
        .map(|((date, collaborator), count)| DailyTotal {
            date,
            collaborator: collaborator.to_string(),
            count,
        })
        .collect();

    let period_total: u64 = filtered.iter().map(|r| u64::from(r.count)).sum();
    let year_total: u64 = year_scoped.iter().map(|r| u64::from(r.count)).sum();
    let year_totals = rank_totals(year_scoped.iter().copied());

    debug!(
        records = records.len(),
        in_year = year_scoped.len(),
        in_period = filtered.len(),
        "aggregation filters applied"
    );
    info!(
        window = %window.label(),
        period_total,
        year_total,
        selected = selected.len(),
        "aggregated period"
    );

    AggregateResult {
        window,
        year: query.year,
        selected,
        grid,
        daily,
        period_totals,
        year_totals,
        period_total,
        year_total,
        warnings,
    }
}

fn dedup_names(names: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names.iter().map(|n| normalize_label(n)) {
        if !name.is_empty() && !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use wpr_model::{PeriodMode, YearScope};

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(d: NaiveDate, name: &str, count: u32) -> NormalizedRecord {
        NormalizedRecord::new(d, Some(name), count)
    }

    #[test]
    fn empty_input_gives_zero_filled_selection() {
        let query = PeriodQuery::new(date(2025, 9, 1)).with_collaborators(vec!["ana".to_string()]);
        let result = aggregate(&[], &query);
        assert_eq!(result.series_for("ANA"), vec![0; 5]);
        assert_eq!(result.period_total, 0);
        assert_eq!(result.year_total, 0);
        assert!(result.daily.is_empty());
    }

    #[test]
    fn weekend_rows_count_for_year_only() {
        let records = vec![
            record(date(2025, 9, 6), "ANA", 4),
            record(date(2025, 9, 2), "ANA", 1),
        ];
        let result = aggregate(&records, &PeriodQuery::new(date(2025, 9, 2)));
        assert_eq!(result.period_total, 1);
        assert_eq!(result.year_total, 5);
    }

    #[test]
    fn attribute_filters_do_not_touch_year_totals() {
        let records = vec![
            record(date(2025, 9, 2), "ANA", 2).with_kind("CORRETIVA"),
            record(date(2025, 9, 2), "BIA", 3).with_kind("PREVENTIVA"),
        ];
        let query = PeriodQuery::new(date(2025, 9, 2)).with_types(vec!["corretiva".to_string()]);
        let result = aggregate(&records, &query);
        assert_eq!(result.period_total, 2);
        assert_eq!(result.year_total, 5);
        assert_eq!(result.year_totals[0].collaborator, "BIA");
    }

    #[test]
    fn year_scope_restricts_both_period_and_year() {
        let records = vec![
            record(date(2024, 12, 30), "ANA", 2),
            record(date(2025, 1, 2), "ANA", 3),
        ];
        let query = PeriodQuery::new(date(2025, 1, 2)).with_year(YearScope::Year(2025));
        let result = aggregate(&records, &query);
        assert_eq!(result.period_total, 3);
        assert_eq!(result.year_total, 3);
        assert_eq!(result.series_for("ANA"), vec![0, 0, 0, 3, 0]);
    }

    #[test]
    fn monthly_daily_detail_is_ordered() {
        let records = vec![
            record(date(2025, 9, 10), "BIA", 1),
            record(date(2025, 9, 3), "CAIO", 1),
            record(date(2025, 9, 3), "ANA", 2),
            record(date(2025, 9, 3), "ANA", 1),
        ];
        let query = PeriodQuery::new(date(2025, 9, 20)).with_mode(PeriodMode::Monthly);
        let result = aggregate(&records, &query);
        let detail: Vec<(u32, &str, u64)> = result
            .daily
            .iter()
            .map(|d| (chrono::Datelike::day(&d.date), d.collaborator.as_str(), d.count))
            .collect();
        assert_eq!(detail, [(3, "ANA", 3), (3, "CAIO", 1), (10, "BIA", 1)]);
    }

    #[test]
    fn explicit_selection_is_normalized_and_deduplicated() {
        let query = PeriodQuery::new(date(2025, 9, 1))
            .with_collaborators(vec!["ana".into(), " ANA ".into(), "bia".into()]);
        let result = aggregate(&[], &query);
        assert_eq!(result.selected, ["ANA", "BIA"]);
        assert_eq!(result.grid.len(), 10);
    }

    #[test]
    fn grid_lists_each_collaborator_week_in_turn() {
        let records = vec![
            record(date(2025, 9, 2), "ANA", 2),
            record(date(2025, 9, 1), "BIA", 1),
        ];
        let result = aggregate(&records, &PeriodQuery::new(date(2025, 9, 1)).with_top_n(2));
        let order: Vec<(&str, u32, u64)> = result
            .grid
            .iter()
            .map(|p| (p.collaborator.as_str(), p.weekday, p.count))
            .collect();
        assert_eq!(
            order,
            [
                ("ANA", 0, 0),
                ("ANA", 1, 2),
                ("ANA", 2, 0),
                ("ANA", 3, 0),
                ("ANA", 4, 0),
                ("BIA", 0, 1),
                ("BIA", 1, 0),
                ("BIA", 2, 0),
                ("BIA", 3, 0),
                ("BIA", 4, 0),
            ]
        );
    }
}
