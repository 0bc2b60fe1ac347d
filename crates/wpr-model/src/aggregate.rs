//! Chart-ready aggregates produced by the period aggregator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::period::{PeriodWarning, PeriodWindow, YearScope};

/// One cell of the weekday × collaborator grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Zero-based weekday, Monday = 0.
    pub weekday: u32,
    pub collaborator: String,
    pub count: u64,
}

/// Sum of notes for one collaborator on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub collaborator: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaboratorTotal {
    pub collaborator: String,
    pub total: u64,
}

/// Output of one aggregation pass. Recomputed on every parameter change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub window: PeriodWindow,
    pub year: YearScope,
    /// Collaborators drawn in the chart, in display order.
    pub selected: Vec<String>,
    /// Zero-filled grid, collaborator-major: the five weekdays of each selected
    /// collaborator in turn.
    pub grid: Vec<ChartPoint>,
    /// Per-date sums inside the window, ordered by date then collaborator.
    pub daily: Vec<DailyTotal>,
    /// Period sums per collaborator, highest first.
    pub period_totals: Vec<CollaboratorTotal>,
    /// Year sums per collaborator (pie series), highest first.
    pub year_totals: Vec<CollaboratorTotal>,
    pub period_total: u64,
    pub year_total: u64,
    pub warnings: Vec<PeriodWarning>,
}

impl AggregateResult {
    pub fn empty(window: PeriodWindow) -> Self {
        Self {
            window,
            year: YearScope::All,
            selected: Vec::new(),
            grid: Vec::new(),
            daily: Vec::new(),
            period_totals: Vec::new(),
            year_totals: Vec::new(),
            period_total: 0,
            year_total: 0,
            warnings: Vec::new(),
        }
    }

    /// Counts for `collaborator` ordered Monday..Friday.
    pub fn series_for(&self, collaborator: &str) -> Vec<u64> {
        let mut points: Vec<&ChartPoint> = self
            .grid
            .iter()
            .filter(|point| point.collaborator == collaborator)
            .collect();
        points.sort_by_key(|point| point.weekday);
        points.into_iter().map(|point| point.count).collect()
    }
}
