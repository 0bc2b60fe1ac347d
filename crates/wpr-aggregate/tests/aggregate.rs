use chrono::NaiveDate;
use proptest::prelude::*;
use wpr_aggregate::{DemandStore, PeriodQuery, aggregate, build_support_tables};
use wpr_model::{DemandMode, NormalizedRecord, PeriodWarning, YearScope};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn single_monday_row_fills_the_week() {
    // ana, 01/09/2025: one row with 3 notes and one whose count was "x".
    let records = vec![
        NormalizedRecord::new(date(2025, 9, 1), Some("ANA"), 3),
        NormalizedRecord::new(date(2025, 9, 1), Some("ANA"), 0),
    ];
    let result = aggregate(&records, &PeriodQuery::new(date(2025, 9, 1)));

    assert_eq!(result.selected, ["ANA"]);
    assert_eq!(result.series_for("ANA"), [3, 0, 0, 0, 0]);
    assert_eq!(result.period_total, 3);
    assert_eq!(result.year_total, 3);
    assert_eq!(result.window.label(), "01/09/2025 a 05/09/2025");
}

#[test]
fn missing_iso_week_keeps_previous_range() {
    let records = vec![NormalizedRecord::new(date(2025, 9, 2), Some("ANA"), 1)];
    let query = PeriodQuery::new(date(2025, 9, 2))
        .with_year(YearScope::Year(2025))
        .with_iso_week(53);
    let result = aggregate(&records, &query);

    assert_eq!(
        result.warnings,
        vec![PeriodWarning::IsoWeekOutOfRange { year: 2025, week: 53 }]
    );
    assert_eq!(result.window.start, date(2025, 9, 1));
    assert_eq!(result.window.end, date(2025, 9, 5));
    assert_eq!(result.period_total, 1);
}

#[test]
fn top_n_pads_with_known_collaborators() {
    let records = vec![
        NormalizedRecord::new(date(2025, 9, 2), Some("DAVI"), 5),
        NormalizedRecord::new(date(2025, 9, 2), Some("CAIO"), 5),
        NormalizedRecord::new(date(2025, 8, 2), Some("ANA"), 9),
        NormalizedRecord::new(date(2025, 8, 2), Some("BIA"), 9),
    ];
    let result = aggregate(&records, &PeriodQuery::new(date(2025, 9, 2)));
    assert_eq!(result.selected, ["CAIO", "DAVI", "ANA"]);
    assert_eq!(result.year_totals[0].collaborator, "ANA");
}

#[test]
fn auto_support_table_for_selected_week() {
    let records = vec![
        NormalizedRecord::new(date(2025, 9, 1), Some("ANA"), 3)
            .with_kind("CORRETIVA")
            .with_locality("CENTRO"),
    ];
    let result = aggregate(&records, &PeriodQuery::new(date(2025, 9, 1)));
    let tables = build_support_tables(
        &records,
        &result.window,
        &result.selected,
        DemandMode::Auto,
        &DemandStore::new(),
    );
    let rows: Vec<(String, u32, &str)> = tables[0]
        .rows
        .iter()
        .map(|r| (wpr_common::format_date(r.date), r.weekday, r.demand.as_str()))
        .collect();
    insta::assert_debug_snapshot!(rows, @r#"
    [
        (
            "01/09/2025",
            0,
            "TIPO: CORRETIVA | LOCAL: CENTRO",
        ),
        (
            "02/09/2025",
            1,
            "-",
        ),
        (
            "03/09/2025",
            2,
            "-",
        ),
        (
            "04/09/2025",
            3,
            "-",
        ),
        (
            "05/09/2025",
            4,
            "-",
        ),
    ]
    "#);
}

fn record_strategy() -> impl Strategy<Value = NormalizedRecord> {
    (
        0u64..60,
        prop::sample::select(vec!["ANA", "BIA", "CAIO", "DAVI"]),
        0u32..20,
        prop::sample::select(vec!["", "CORRETIVA", "PREVENTIVA"]),
    )
        .prop_map(|(offset, name, count, kind)| {
            let day = date(2025, 8, 18) + chrono::Days::new(offset);
            NormalizedRecord::new(day, Some(name), count).with_kind(kind)
        })
}

proptest! {
    #[test]
    fn grid_has_five_points_per_selected(
        records in prop::collection::vec(record_strategy(), 0..80),
        reference_offset in 0u64..60,
        top_n in 0usize..6,
    ) {
        let reference = date(2025, 8, 18) + chrono::Days::new(reference_offset);
        let result = aggregate(&records, &PeriodQuery::new(reference).with_top_n(top_n));

        prop_assert_eq!(result.grid.len(), result.selected.len() * 5);
        for name in &result.selected {
            prop_assert_eq!(result.series_for(name).len(), 5);
        }
        let grid_sum: u64 = result.grid.iter().map(|p| p.count).sum();
        prop_assert!(grid_sum <= result.period_total);
        prop_assert!(result.period_total <= result.year_total);
    }

    #[test]
    fn aggregation_is_idempotent(
        records in prop::collection::vec(record_strategy(), 0..80),
        reference_offset in 0u64..60,
        restrict in any::<bool>(),
    ) {
        let reference = date(2025, 8, 18) + chrono::Days::new(reference_offset);
        let mut query = PeriodQuery::new(reference);
        if restrict {
            query = query.with_types(vec!["CORRETIVA".to_string()]);
        }
        prop_assert_eq!(aggregate(&records, &query), aggregate(&records, &query));
    }
}
