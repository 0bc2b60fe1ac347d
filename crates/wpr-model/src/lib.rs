//! Shared data model for the weekly productivity report.
//!
//! Every stage of the pipeline (ingest, column resolution, normalization,
//! aggregation, export) exchanges the types defined here.

pub mod aggregate;
pub mod error;
pub mod mapping;
pub mod period;
pub mod record;
pub mod support;

pub use aggregate::{AggregateResult, ChartPoint, CollaboratorTotal, DailyTotal};
pub use error::{ModelError, Result};
pub use mapping::{ColumnRef, FieldMapping, FieldRole};
pub use period::{DATE_FORMAT, PeriodMode, PeriodWarning, PeriodWindow, YearScope, monday_of};
pub use record::{LoadReport, NormalizedRecord};
pub use support::{DemandMode, EMPTY_DEMAND, SupportRow, SupportTable};

/// Filter value meaning "no restriction".
pub const TOTAL_FILTER: &str = "TOTAL";
