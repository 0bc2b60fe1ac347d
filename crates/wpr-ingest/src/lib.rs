//! Table ingestion for the weekly productivity report.
//!
//! Loads the source table from a local CSV/workbook or from a remote share
//! link into a text-only Polars DataFrame. Typing and validation of the
//! individual fields happen later, in normalization.
//!
//! # Example
//!
//! ```ignore
//! use wpr_ingest::{LoadOptions, SheetSelector, TableCache, TableSource, load_table_cached};
//!
//! let cache = TableCache::default();
//! let source = TableSource::from_arg("base.xlsx", SheetSelector::First);
//! let table = load_table_cached(&source, &LoadOptions::default(), &cache)?;
//! println!("{} rows", table.height());
//! ```

mod cache;
mod csv;
mod error;
mod files;
mod remote;
mod source;
mod table;
mod workbook;

// === Error Types ===
pub use error::{IngestError, Result};

// === Tables ===
pub use table::{RawTable, TableFormat, validate_table_shape};

// === Readers ===
pub use csv::{decode_text, detect_delimiter, read_csv_bytes, read_csv_file};
pub use files::{MAX_TABLE_SIZE, check_file_size};
pub use workbook::{SheetSelector, read_workbook_bytes, read_workbook_file};

// === Remote ===
pub use remote::{DEFAULT_TIMEOUT, Download, Payload, RemoteClient, direct_download_url, sniff_payload};

// === Sources and Caching ===
pub use cache::{DEFAULT_CACHE_TTL, TableCache};
pub use source::{LoadOptions, TableSource, load_table, load_table_cached};
