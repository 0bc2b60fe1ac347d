//! Per-user selections and manual demand tags.

use chrono::NaiveDate;
use wpr_aggregate::{DEFAULT_TOP_N, DemandStore, PeriodQuery};
use wpr_model::{DemandMode, PeriodMode, YearScope};

/// Values a reset returns to; normally taken from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionDefaults {
    pub mode: PeriodMode,
    pub chart_top_n: usize,
    pub support_top_n: usize,
    pub demand_mode: DemandMode,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            mode: PeriodMode::Weekly,
            chart_top_n: DEFAULT_TOP_N,
            support_top_n: DEFAULT_TOP_N,
            demand_mode: DemandMode::Manual,
        }
    }
}

/// Session context: current selections plus the demand tags typed in.
///
/// Created when the dataset loads and changed only through
/// [`SessionEvent`](crate::SessionEvent)s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub defaults: SessionDefaults,
    pub mode: PeriodMode,
    pub reference: NaiveDate,
    pub year: YearScope,
    pub range: Option<(NaiveDate, NaiveDate)>,
    pub iso_week: Option<u32>,
    pub types: Vec<String>,
    pub localities: Vec<String>,
    /// Explicit selection; `None` means the top collaborators of the period.
    pub collaborators: Option<Vec<String>>,
    pub chart_top_n: usize,
    pub support_top_n: usize,
    pub demand_mode: DemandMode,
    pub demands: DemandStore,
}

impl Session {
    pub fn new(reference: NaiveDate) -> Self {
        Self::with_defaults(reference, SessionDefaults::default())
    }

    pub fn with_defaults(reference: NaiveDate, defaults: SessionDefaults) -> Self {
        Self {
            defaults,
            mode: defaults.mode,
            reference,
            year: YearScope::All,
            range: None,
            iso_week: None,
            types: Vec::new(),
            localities: Vec::new(),
            collaborators: None,
            chart_top_n: defaults.chart_top_n,
            support_top_n: defaults.support_top_n,
            demand_mode: defaults.demand_mode,
            demands: DemandStore::new(),
        }
    }

    /// Aggregation parameters for the chart.
    pub fn query(&self) -> PeriodQuery {
        PeriodQuery {
            mode: self.mode,
            reference: self.reference,
            year: self.year,
            range: self.range,
            iso_week: self.iso_week,
            types: self.types.clone(),
            localities: self.localities.clone(),
            collaborators: self.collaborators.clone(),
            top_n: self.chart_top_n,
        }
    }
}
