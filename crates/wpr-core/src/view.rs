//! Pure rendering of a session against a dataset.

use serde::{Deserialize, Serialize};
use tracing::debug;
use wpr_aggregate::{
    FilterOptions, aggregate, build_support_tables, filter_options, top_collaborators,
};
use wpr_common::WEEKDAY_LABELS;
use wpr_model::{AggregateResult, LoadReport, SupportTable};

use crate::dataset::Dataset;
use crate::event::SessionEvent;
use crate::session::Session;

/// One bar series of the weekly chart: Monday..Friday values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub collaborator: String,
    pub values: Vec<u64>,
}

/// Everything a front end needs to draw one state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewModel {
    pub period: String,
    pub weekday_labels: Vec<String>,
    pub chart: Vec<ChartSeries>,
    pub result: AggregateResult,
    pub support_tables: Vec<SupportTable>,
    pub options: FilterOptions,
    pub years: Vec<i32>,
    pub load_report: LoadReport,
}

impl ViewModel {
    /// Warning lines, in display form.
    pub fn warning_messages(&self) -> Vec<String> {
        self.result.warnings.iter().map(ToString::to_string).collect()
    }
}

/// Renders `session` against `dataset`.
pub fn render(session: &Session, dataset: &Dataset) -> ViewModel {
    let query = session.query();
    let result = aggregate(&dataset.records, &query);

    let chart = result
        .selected
        .iter()
        .map(|name| ChartSeries {
            collaborator: name.clone(),
            values: result.series_for(name),
        })
        .collect();

    let support_names = if session.collaborators.is_some() {
        result.selected.clone()
    } else {
        top_collaborators(
            &result.period_totals,
            &dataset.collaborators(),
            session.support_top_n,
        )
    };
    let support_tables = build_support_tables(
        &dataset.records,
        &result.window,
        &support_names,
        session.demand_mode,
        &session.demands,
    );

    debug!(
        series = result.selected.len(),
        support_tables = support_tables.len(),
        "view rendered"
    );

    ViewModel {
        period: result.window.label(),
        weekday_labels: WEEKDAY_LABELS[..5].iter().map(|l| (*l).to_string()).collect(),
        chart,
        support_tables,
        options: filter_options(&dataset.records, &query),
        years: dataset.years(),
        load_report: dataset.report,
        result,
    }
}

/// Applies `event` and renders the resulting state.
pub fn step(session: Session, dataset: &Dataset, event: SessionEvent) -> (Session, ViewModel) {
    let mut next = session;
    next.apply(event);
    let view = render(&next, dataset);
    (next, view)
}
