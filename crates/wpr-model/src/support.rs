//! Per-collaborator support (demand) tables.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Label used when a day has no demand.
pub const EMPTY_DEMAND: &str = "-";

/// Where the demand label of a support-table row comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemandMode {
    /// Tags entered by hand and kept in the session.
    #[default]
    Manual,
    /// Summary of the dominant note types and localities of the day.
    Auto,
    /// Free-text demand column of the source table.
    Column,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportRow {
    pub date: NaiveDate,
    /// Zero-based weekday, Monday = 0.
    pub weekday: u32,
    pub demand: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportTable {
    pub collaborator: String,
    pub week_start: NaiveDate,
    pub rows: Vec<SupportRow>,
}
