//! Where a table comes from and how to load it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cache::TableCache;
use crate::csv::{read_csv_bytes, read_csv_file};
use crate::error::Result;
use crate::files::{MAX_TABLE_SIZE, read_file_bytes};
use crate::remote::{DEFAULT_TIMEOUT, Payload, RemoteClient, sniff_payload};
use crate::table::RawTable;
use crate::workbook::{SheetSelector, read_workbook_bytes, read_workbook_file};

const CSV_EXTENSIONS: [&str; 3] = ["csv", "tsv", "txt"];
const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// A local file or a remote share link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TableSource {
    File { path: PathBuf, sheet: SheetSelector },
    Remote { url: String, sheet: SheetSelector },
}

impl TableSource {
    /// `http(s)://` arguments are remote, anything else is a path.
    pub fn from_arg(value: &str, sheet: SheetSelector) -> Self {
        let trimmed = value.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Remote {
                url: trimmed.to_string(),
                sheet,
            }
        } else {
            Self::File {
                path: PathBuf::from(trimmed),
                sheet,
            }
        }
    }

    /// Cache key: the location plus the sheet.
    pub fn cache_key(&self) -> String {
        match self {
            Self::File { path, sheet } => format!("file:{}#{sheet}", path.display()),
            Self::Remote { url, sheet } => format!("url:{url}#{sheet}"),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }
}

impl fmt::Display for TableSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File { path, .. } => write!(f, "{}", path.display()),
            Self::Remote { url, .. } => f.write_str(url),
        }
    }
}

/// Limits applied while loading.
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    pub timeout: Duration,
    pub max_size: u64,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_size: MAX_TABLE_SIZE,
        }
    }
}

/// Loads a table without caching.
pub fn load_table(source: &TableSource, options: &LoadOptions) -> Result<RawTable> {
    let table = match source {
        TableSource::File { path, sheet } => load_file(path, sheet, options.max_size)?,
        TableSource::Remote { url, sheet } => {
            let client = RemoteClient::new(options.timeout, options.max_size)?;
            let download = client.fetch(url)?;
            match download.payload {
                Payload::Workbook => read_workbook_bytes(download.bytes, sheet, &download.url)?,
                Payload::Csv => read_csv_bytes(&download.bytes, &download.url)?,
            }
        }
    };
    info!(
        origin = %table.origin,
        format = %table.format,
        rows = table.height(),
        columns = table.width(),
        "table loaded"
    );
    Ok(table)
}

/// Loads a table through `cache`, keyed by [`TableSource::cache_key`].
pub fn load_table_cached(
    source: &TableSource,
    options: &LoadOptions,
    cache: &TableCache,
) -> Result<RawTable> {
    cache.get_or_load(&source.cache_key(), || load_table(source, options))
}

fn load_file(path: &Path, sheet: &SheetSelector, max_size: u64) -> Result<RawTable> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if CSV_EXTENSIONS.contains(&extension.as_str()) {
        return read_csv_file(path, max_size);
    }
    if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
        return read_workbook_file(path, sheet, max_size);
    }

    let origin = path.display().to_string();
    let bytes = read_file_bytes(path, max_size)?;
    match sniff_payload(&bytes, None, &origin)? {
        Payload::Workbook => read_workbook_bytes(bytes, sheet, &origin),
        Payload::Csv => read_csv_bytes(&bytes, &origin),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_arg_detects_urls() {
        let source = TableSource::from_arg("HTTPS://example.com/a.csv", SheetSelector::First);
        assert!(source.is_remote());
        let source = TableSource::from_arg("dados/base.xlsx", SheetSelector::Index(1));
        assert!(!source.is_remote());
        assert_eq!(source.cache_key(), "file:dados/base.xlsx##1");
    }
}
