//! A loaded, resolved and normalized table.

use std::collections::BTreeSet;

use chrono::Datelike;
use tracing::{info, info_span};
use wpr_aggregate::known_collaborators;
use wpr_ingest::{LoadOptions, RawTable, TableCache, TableSource, load_table_cached};
use wpr_map::{MappingStrategy, resolve};
use wpr_model::{FieldMapping, LoadReport, NormalizedRecord};
use wpr_normalization::normalize;

use crate::error::Result;

/// Everything derived from one source table. Immutable once built.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub table: RawTable,
    pub mapping: FieldMapping,
    pub records: Vec<NormalizedRecord>,
    pub report: LoadReport,
}

impl Dataset {
    /// Resolves and normalizes an already loaded table.
    pub fn from_table(table: RawTable, strategy: &MappingStrategy) -> Result<Self> {
        let mapping = resolve(&table.headers(), strategy)?;
        let (records, report) = normalize(&table, &mapping)?;
        Ok(Self {
            table,
            mapping,
            records,
            report,
        })
    }

    /// Builds a dataset straight from records, bypassing ingestion.
    pub fn from_records(table: RawTable, mapping: FieldMapping, records: Vec<NormalizedRecord>) -> Self {
        let report = LoadReport {
            total_rows: records.len(),
            kept_rows: records.len(),
            ..LoadReport::default()
        };
        Self {
            table,
            mapping,
            records,
            report,
        }
    }

    pub fn collaborators(&self) -> BTreeSet<String> {
        known_collaborators(&self.records)
    }

    /// Distinct years present, ascending; feeds the year selector.
    pub fn years(&self) -> Vec<i32> {
        let years: BTreeSet<i32> = self.records.iter().map(|r| r.date.year()).collect();
        years.into_iter().collect()
    }

    /// Most recent record date, the natural default reference.
    pub fn latest_date(&self) -> Option<chrono::NaiveDate> {
        self.records.iter().map(|r| r.date).max()
    }
}

/// Loads `source` through `cache`, then resolves and normalizes it.
///
/// # Errors
///
/// Ingestion failures, a mandatory column that cannot be resolved, or a
/// positional layout wider than the table.
pub fn load_dataset(
    source: &TableSource,
    strategy: &MappingStrategy,
    options: &LoadOptions,
    cache: &TableCache,
) -> Result<Dataset> {
    let span = info_span!("load_dataset", source = %source);
    let _guard = span.enter();

    let table = load_table_cached(source, options, cache)?;
    let dataset = Dataset::from_table(table, strategy)?;
    info!(
        records = dataset.records.len(),
        collaborators = dataset.collaborators().len(),
        "dataset ready"
    );
    Ok(dataset)
}
