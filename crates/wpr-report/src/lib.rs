//! Report exports.
//!
//! Both exporters read the same inputs: an
//! [`AggregateResult`](wpr_model::AggregateResult) and the support tables
//! rendered for it. The PDF goes through a [`ReportDocument`] model first so
//! its content can be checked without parsing PDF output.

mod document;
mod error;
mod pdf;
mod xlsx;

pub use document::{DocumentSection, ReportDocument, TextTable};
pub use error::{ReportError, Result};
pub use pdf::{fold_ascii, pdf_bytes, write_pdf};
pub use xlsx::{SHEET_NAMES, build_workbook, write_xlsx};
