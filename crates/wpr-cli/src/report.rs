//! One report run: load, replay the requested events, render.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use tracing::info;
use wpr_core::{Dataset, Session, SessionDefaults, SessionEvent, ViewModel, load_dataset, render};
use wpr_ingest::{LoadOptions, TableCache, TableSource};
use wpr_map::MappingStrategy;

/// Inputs of a report run, already merged from config and flags.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub source: TableSource,
    pub strategy: MappingStrategy,
    pub load: LoadOptions,
    /// Anchor date; defaults to the latest record, then today.
    pub reference: Option<NaiveDate>,
    pub defaults: SessionDefaults,
    /// Applied in order after the session is created.
    pub events: Vec<SessionEvent>,
}

/// Result of a run, kept together for printing and exporting.
#[derive(Debug)]
pub struct ReportOutcome {
    pub dataset: Dataset,
    pub session: Session,
    pub view: ViewModel,
}

/// Loads the dataset and renders the requested state.
///
/// The table comes from `cache` while its entry is fresh, so an embedder that
/// keeps one cache across runs re-reads the source only after the TTL.
pub fn run_report(request: ReportRequest, cache: &TableCache) -> Result<ReportOutcome> {
    let dataset = load_dataset(&request.source, &request.strategy, &request.load, cache)
        .with_context(|| format!("load {}", request.source))?;

    let reference = request
        .reference
        .or_else(|| dataset.latest_date())
        .unwrap_or_else(|| Local::now().date_naive());
    let mut session = Session::with_defaults(reference, request.defaults);
    for event in request.events {
        session.apply(event);
    }

    let view = render(&session, &dataset);
    info!(period = %view.period, total = view.result.period_total, "report rendered");
    Ok(ReportOutcome {
        dataset,
        session,
        view,
    })
}
