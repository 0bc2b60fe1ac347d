//! Error types for table ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a table.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Table file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File or download exceeds the size limit.
    #[error("{origin} is too large ({size} bytes, limit {max_size} bytes)")]
    TooLarge {
        origin: String,
        size: u64,
        max_size: u64,
    },

    // === Parsing Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV from {origin}: {message}")]
    CsvParse { origin: String, message: String },

    /// Failed to open or read a workbook.
    #[error("failed to read workbook {origin}: {message}")]
    Workbook { origin: String, message: String },

    /// Requested sheet does not exist.
    #[error("sheet {sheet} not found in {origin} (available: {available})")]
    SheetNotFound {
        origin: String,
        sheet: String,
        available: String,
    },

    /// Byte order mark of an encoding we cannot read.
    #[error("unsupported encoding {encoding} in {origin}")]
    UnsupportedEncoding {
        origin: String,
        encoding: &'static str,
    },

    /// Table has a header but no data rows, or nothing at all.
    #[error("table from {origin} is empty")]
    EmptyTable { origin: String },

    // === Remote Errors ===
    /// Request could not be sent or the body could not be read.
    #[error("network error fetching {url}: {message}")]
    Network { url: String, message: String },

    /// Server answered with a non-success status.
    #[error("{url} answered HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// Server returned an HTML page instead of a table.
    #[error(
        "{url} returned an HTML page instead of a table; check that the link is shared publicly"
    )]
    HtmlResponse { url: String },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl IngestError {
    /// Short message suitable for showing to the person running the report.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } | Self::FileRead { .. } => "Could not read the data file.",
            Self::Network { .. } | Self::HttpStatus { .. } => {
                "Could not download the remote table. Check the link and your connection."
            }
            Self::HtmlResponse { .. } => {
                "The link did not return a table. Make sure it is shared for anyone with the link."
            }
            Self::EmptyTable { .. } => "The table has no rows.",
            Self::TooLarge { .. } => "The table is too large to load.",
            Self::CsvParse { .. }
            | Self::Workbook { .. }
            | Self::SheetNotFound { .. }
            | Self::UnsupportedEncoding { .. }
            | Self::DataFrame { .. } => "The table could not be parsed.",
        }
    }
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/data/notas.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /data/notas.csv");
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("DATA".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DataFrame { .. }));
    }

    #[test]
    fn test_html_user_message() {
        let err = IngestError::HtmlResponse {
            url: "https://example.com".to_string(),
        };
        assert!(err.user_message().contains("shared"));
    }
}
