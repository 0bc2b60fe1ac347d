//! Row-level conversion.

use tracing::{debug, info, trace, warn};
use wpr_common::{
    collapse_whitespace, column_strings, normalize_label, parse_count, parse_date_day_first,
    redact_value,
};
use wpr_ingest::RawTable;
use wpr_model::{ColumnRef, FieldMapping, LoadReport, NormalizedRecord};

use crate::error::{NormalizationError, Result};

/// Trimmed, upper-cased collaborator name; blank cells become `None`.
pub fn normalize_collaborator(value: &str) -> Option<String> {
    let name = normalize_label(value);
    (!name.is_empty()).then_some(name)
}

/// Converts one row. Returns `None` when the date cannot be parsed.
///
/// The second value is true when a non-blank count had to be coerced to zero.
pub fn normalize_row(
    date: &str,
    collaborator: &str,
    count: &str,
    kind: &str,
    locality: &str,
    demand: &str,
) -> Option<(NormalizedRecord, bool)> {
    let date = parse_date_day_first(date)?;
    let parsed = parse_count(count);
    let coerced = parsed.is_none() && !count.trim().is_empty();
    let record = NormalizedRecord {
        date,
        collaborator: normalize_collaborator(collaborator),
        count: parsed.unwrap_or(0),
        kind: normalize_label(kind),
        locality: normalize_label(locality),
        demand: collapse_whitespace(demand),
    };
    Some((record, coerced))
}

fn column(table: &RawTable, column: &ColumnRef) -> Result<Vec<String>> {
    column_strings(&table.frame, column.index).ok_or_else(|| NormalizationError::MissingColumn {
        index: column.index,
        name: column.name.clone(),
    })
}

fn optional_column(table: &RawTable, column_ref: Option<&ColumnRef>) -> Result<Option<Vec<String>>> {
    column_ref.map(|c| column(table, c)).transpose()
}

/// Applies `mapping` to every row of `table`.
///
/// # Errors
///
/// Only when the mapping refers to a column the table does not have, which
/// means it was resolved against a different table.
pub fn normalize(
    table: &RawTable,
    mapping: &FieldMapping,
) -> Result<(Vec<NormalizedRecord>, LoadReport)> {
    let dates = column(table, &mapping.date)?;
    let collaborators = column(table, &mapping.collaborator)?;
    let counts = column(table, &mapping.count)?;
    let kinds = optional_column(table, mapping.kind.as_ref())?;
    let localities = optional_column(table, mapping.locality.as_ref())?;
    let demands = optional_column(table, mapping.demand.as_ref())?;

    let cell = |values: &Option<Vec<String>>, idx: usize| -> String {
        values
            .as_ref()
            .and_then(|v| v.get(idx).cloned())
            .unwrap_or_default()
    };

    let mut report = LoadReport {
        total_rows: table.height(),
        ..LoadReport::default()
    };
    let mut records = Vec::with_capacity(table.height());

    for idx in 0..table.height() {
        let Some((record, coerced)) = normalize_row(
            &dates[idx],
            &collaborators[idx],
            &counts[idx],
            &cell(&kinds, idx),
            &cell(&localities, idx),
            &cell(&demands, idx),
        ) else {
            report.dropped_invalid_date += 1;
            debug!(row = idx + 1, value = %dates[idx], "dropping row with unparsable date");
            continue;
        };

        if coerced {
            report.coerced_counts += 1;
            trace!(row = idx + 1, value = %counts[idx], "count coerced to zero");
        }
        if record.collaborator.is_none() {
            report.missing_collaborator += 1;
        } else {
            trace!(
                row = idx + 1,
                collaborator = redact_value(&collaborators[idx]),
                count = record.count,
                "row normalized"
            );
        }
        records.push(record);
    }
    report.kept_rows = records.len();

    if report.has_dropped_rows() {
        warn!(
            dropped = report.dropped_invalid_date,
            total = report.total_rows,
            "rows with unparsable dates were dropped"
        );
    }
    if report.coerced_counts > 0 {
        warn!(coerced = report.coerced_counts, "non-numeric counts treated as zero");
    }
    info!(
        origin = %table.origin,
        rows = report.kept_rows,
        missing_collaborator = report.missing_collaborator,
        "normalized table"
    );

    Ok((records, report))
}
