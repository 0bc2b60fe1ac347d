//! Normalized rows and the bookkeeping produced while building them.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// One row after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub date: NaiveDate,
    /// Trimmed, upper-cased collaborator name; `None` when the cell was empty.
    pub collaborator: Option<String>,
    /// Non-negative note count; unparsable cells become 0.
    pub count: u32,
    /// Note type, trimmed and upper-cased, empty when absent.
    pub kind: String,
    /// Locality, trimmed and upper-cased, empty when absent.
    pub locality: String,
    /// Free-text demand annotation, trimmed, empty when absent.
    pub demand: String,
}

impl NormalizedRecord {
    pub fn new(date: NaiveDate, collaborator: Option<&str>, count: u32) -> Self {
        Self {
            date,
            collaborator: collaborator.map(str::to_string),
            count,
            kind: String::new(),
            locality: String::new(),
            demand: String::new(),
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: &str) -> Self {
        self.kind = kind.to_string();
        self
    }

    #[must_use]
    pub fn with_locality(mut self, locality: &str) -> Self {
        self.locality = locality.to_string();
        self
    }

    #[must_use]
    pub fn with_demand(mut self, demand: &str) -> Self {
        self.demand = demand.to_string();
        self
    }

    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    /// Zero-based weekday index, Monday = 0.
    pub fn weekday_index(&self) -> u32 {
        self.date.weekday().num_days_from_monday()
    }

    pub fn is_business_day(&self) -> bool {
        self.weekday_index() < 5
    }
}

/// Counters collected while normalizing a raw table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    pub total_rows: usize,
    pub kept_rows: usize,
    pub dropped_invalid_date: usize,
    pub coerced_counts: usize,
    pub missing_collaborator: usize,
}

impl LoadReport {
    pub fn has_dropped_rows(&self) -> bool {
        self.dropped_invalid_date > 0
    }
}
