//! Aggregation parameters.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use wpr_model::{PeriodMode, YearScope};

/// Default number of collaborators picked when none are selected.
pub const DEFAULT_TOP_N: usize = 3;

/// Everything the aggregator is parameterized by.
///
/// Rebuilt from the session on every interaction; aggregation is a pure
/// function of the records and this value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodQuery {
    pub mode: PeriodMode,
    /// Anchor date for weekly/monthly windows.
    pub reference: NaiveDate,
    pub year: YearScope,
    /// Explicit `[start, end]` range; may arrive inverted.
    pub range: Option<(NaiveDate, NaiveDate)>,
    /// ISO week number override, weekly mode only.
    pub iso_week: Option<u32>,
    /// Allowed note types. Empty or containing `TOTAL` means all.
    pub types: Vec<String>,
    /// Allowed localities. Empty or containing `TOTAL` means all.
    pub localities: Vec<String>,
    /// Explicit chart selection; `None` picks the top `top_n`.
    pub collaborators: Option<Vec<String>>,
    pub top_n: usize,
}

impl PeriodQuery {
    pub fn new(reference: NaiveDate) -> Self {
        Self {
            mode: PeriodMode::Weekly,
            reference,
            year: YearScope::All,
            range: None,
            iso_week: None,
            types: Vec::new(),
            localities: Vec::new(),
            collaborators: None,
            top_n: DEFAULT_TOP_N,
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: PeriodMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_year(mut self, year: YearScope) -> Self {
        self.year = year;
        self
    }

    #[must_use]
    pub fn with_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.range = Some((start, end));
        self
    }

    #[must_use]
    pub fn with_iso_week(mut self, week: u32) -> Self {
        self.iso_week = Some(week);
        self
    }

    #[must_use]
    pub fn with_types(mut self, types: Vec<String>) -> Self {
        self.types = types;
        self
    }

    #[must_use]
    pub fn with_localities(mut self, localities: Vec<String>) -> Self {
        self.localities = localities;
        self
    }

    #[must_use]
    pub fn with_collaborators(mut self, collaborators: Vec<String>) -> Self {
        self.collaborators = Some(collaborators);
        self
    }

    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }
}
