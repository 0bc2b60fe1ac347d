//! Spreadsheet workbooks (xlsx, xlsm, xlsb, xls, ods) through calamine.

use std::collections::HashSet;
use std::fmt;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{Data, Range, Reader, Sheets, open_workbook_auto, open_workbook_auto_from_rs};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use serde::{Deserialize, Serialize};
use wpr_common::format_numeric;

use crate::error::{IngestError, Result};
use crate::files::check_file_size;
use crate::table::{RawTable, TableFormat, validate_table_shape};

/// Which sheet of a workbook to read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SheetSelector {
    #[default]
    First,
    Index(usize),
    Name(String),
}

impl SheetSelector {
    /// Parses a CLI/config value: a number selects by zero-based index, anything else by name.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Self::First;
        }
        match trimmed.parse::<usize>() {
            Ok(index) => Self::Index(index),
            Err(_) => Self::Name(trimmed.to_string()),
        }
    }
}

impl fmt::Display for SheetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => f.write_str("#0"),
            Self::Index(index) => write!(f, "#{index}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// Reads one sheet of a workbook file.
pub fn read_workbook_file(path: &Path, sheet: &SheetSelector, max_size: u64) -> Result<RawTable> {
    check_file_size(path, max_size)?;
    let origin = path.display().to_string();
    let workbook = open_workbook_auto(path).map_err(|e| IngestError::Workbook {
        origin: origin.clone(),
        message: e.to_string(),
    })?;
    read_sheet(workbook, sheet, &origin)
}

/// Reads one sheet of a workbook held in memory (e.g. a download).
pub fn read_workbook_bytes(bytes: Vec<u8>, sheet: &SheetSelector, origin: &str) -> Result<RawTable> {
    let workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| IngestError::Workbook {
            origin: origin.to_string(),
            message: e.to_string(),
        })?;
    read_sheet(workbook, sheet, origin)
}

fn read_sheet<RS>(mut workbook: Sheets<RS>, sheet: &SheetSelector, origin: &str) -> Result<RawTable>
where
    RS: Read + Seek,
{
    let names = workbook.sheet_names();
    let not_found = || IngestError::SheetNotFound {
        origin: origin.to_string(),
        sheet: sheet.to_string(),
        available: names.join(", "),
    };
    let workbook_error = |e: calamine::Error| IngestError::Workbook {
        origin: origin.to_string(),
        message: e.to_string(),
    };

    let range = match sheet {
        SheetSelector::First => workbook
            .worksheet_range_at(0)
            .ok_or_else(not_found)?
            .map_err(workbook_error)?,
        SheetSelector::Index(index) => workbook
            .worksheet_range_at(*index)
            .ok_or_else(not_found)?
            .map_err(workbook_error)?,
        SheetSelector::Name(name) => {
            let matched = names
                .iter()
                .find(|candidate| candidate.trim().eq_ignore_ascii_case(name.trim()))
                .cloned()
                .ok_or_else(not_found)?;
            workbook.worksheet_range(&matched).map_err(workbook_error)?
        }
    };

    tracing::debug!(origin, sheet = %sheet, rows = range.height(), "read worksheet");
    let frame = range_to_frame(&range)?;
    let table = RawTable::new(frame, TableFormat::Workbook, origin);
    validate_table_shape(&table)?;
    Ok(table)
}

/// Converts a worksheet range into a text-only DataFrame.
///
/// The first row is the header; blank headers become `column_N` and repeated
/// headers get a numeric suffix so every column name is unique. Fully blank
/// rows are skipped.
fn range_to_frame(range: &Range<Data>) -> Result<DataFrame> {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(DataFrame::empty());
    };
    let headers = unique_headers(header_row);

    let mut values: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for row in rows {
        let cells: Vec<String> = (0..headers.len())
            .map(|idx| row.get(idx).map(cell_to_string).unwrap_or_default())
            .collect();
        if cells.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        for (column, cell) in values.iter_mut().zip(cells) {
            column.push(cell);
        }
    }

    let columns: Vec<Column> = headers
        .into_iter()
        .zip(values)
        .map(|(name, column)| Series::new(name.into(), column).into_column())
        .collect();
    Ok(DataFrame::new(columns)?)
}

fn unique_headers(row: &[Data]) -> Vec<String> {
    let mut seen = HashSet::new();
    row.iter()
        .enumerate()
        .map(|(idx, cell)| {
            let raw = cell_to_string(cell).trim().to_string();
            let base = if raw.is_empty() {
                format!("column_{}", idx + 1)
            } else {
                raw
            };
            let mut name = base.clone();
            let mut suffix = 1;
            while !seen.insert(name.clone()) {
                name = format!("{base}_{suffix}");
                suffix += 1;
            }
            name
        })
        .collect()
}

/// Renders a workbook cell as text. Date cells become `YYYY-MM-DD`.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => format_numeric(*f),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|value| value.date().format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| format_numeric(dt.as_f64())),
    }
}
