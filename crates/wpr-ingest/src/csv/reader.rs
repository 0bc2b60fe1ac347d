//! CSV loading into a text-only Polars DataFrame.

use std::io::Cursor;
use std::path::Path;

use polars::prelude::{CsvReadOptions, SerReader};

use crate::error::{IngestError, Result};
use crate::files::read_file_bytes;
use crate::table::{RawTable, TableFormat, validate_table_shape};

use super::sniff::{decode_text, detect_delimiter};

/// Reads a CSV file, sniffing encoding and delimiter.
pub fn read_csv_file(path: &Path, max_size: u64) -> Result<RawTable> {
    let bytes = read_file_bytes(path, max_size)?;
    read_csv_bytes(&bytes, &path.display().to_string())
}

/// Parses CSV bytes into a [`RawTable`].
///
/// Schema inference is disabled so every column stays text; typing is the
/// normalizer's job.
pub fn read_csv_bytes(bytes: &[u8], origin: &str) -> Result<RawTable> {
    let text = decode_text(bytes, origin)?;
    if text.trim().is_empty() {
        return Err(IngestError::EmptyTable {
            origin: origin.to_string(),
        });
    }
    let separator = detect_delimiter(&text);
    tracing::debug!(origin, separator = %char::from(separator).escape_default(), "parsing CSV");

    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|options| {
            options
                .with_separator(separator)
                .with_truncate_ragged_lines(true)
        })
        .into_reader_with_file_handle(Cursor::new(text.into_bytes()))
        .finish()
        .map_err(|e| IngestError::CsvParse {
            origin: origin.to_string(),
            message: e.to_string(),
        })?;

    let table = RawTable::new(frame, TableFormat::Csv, origin);
    validate_table_shape(&table)?;
    Ok(table)
}
