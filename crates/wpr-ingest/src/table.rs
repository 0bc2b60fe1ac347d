//! The loaded, still untyped table.

use std::fmt;

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};

/// Tables wider than this are logged as suspicious.
const WIDE_TABLE_COLUMNS: usize = 500;

/// Physical format the table was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    Csv,
    Workbook,
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => f.write_str("csv"),
            Self::Workbook => f.write_str("workbook"),
        }
    }
}

/// A table as loaded from its source: every column holds text.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub frame: DataFrame,
    pub format: TableFormat,
    /// Path or URL the table came from.
    pub origin: String,
}

impl RawTable {
    pub fn new(frame: DataFrame, format: TableFormat, origin: impl Into<String>) -> Self {
        Self {
            frame,
            format,
            origin: origin.into(),
        }
    }

    /// Header names in column order.
    pub fn headers(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .map(ToString::to_string)
            .collect()
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn width(&self) -> usize {
        self.frame.width()
    }
}

/// Validate the table shape after loading.
///
/// An empty table is a load error; very wide tables only produce a warning.
pub fn validate_table_shape(table: &RawTable) -> Result<()> {
    if table.height() == 0 || table.width() == 0 {
        return Err(IngestError::EmptyTable {
            origin: table.origin.clone(),
        });
    }

    if table.width() > WIDE_TABLE_COLUMNS {
        tracing::warn!(
            origin = %table.origin,
            columns = table.width(),
            "table has more than {WIDE_TABLE_COLUMNS} columns"
        );
    }

    Ok(())
}
