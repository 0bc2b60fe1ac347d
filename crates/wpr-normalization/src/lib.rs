//! Normalization of raw tables into typed records.
//!
//! Every cell arrives as text. This crate applies the mapping produced by the
//! resolver and recovers row by row: unparsable dates drop the row, unparsable
//! counts become zero, and both are tallied in a [`LoadReport`](wpr_model::LoadReport).

mod error;
mod records;

pub use error::{NormalizationError, Result};
pub use records::{normalize, normalize_collaborator, normalize_row};
