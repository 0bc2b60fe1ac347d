//! Selector contents for the type and locality filters.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use wpr_model::{NormalizedRecord, TOTAL_FILTER};

use crate::query::PeriodQuery;
use crate::window::resolve_window;

/// Distinct values available in the current period, `TOTAL` first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub types: Vec<String>,
    pub localities: Vec<String>,
}

/// Collects the type and locality values of records inside the query's
/// window and year scope, before attribute filtering.
pub fn filter_options(records: &[NormalizedRecord], query: &PeriodQuery) -> FilterOptions {
    let (window, _) = resolve_window(query);
    let mut types = BTreeSet::new();
    let mut localities = BTreeSet::new();
    for record in records
        .iter()
        .filter(|r| query.year.contains(r.date) && window.contains(r.date))
    {
        if !record.kind.is_empty() {
            types.insert(record.kind.as_str());
        }
        if !record.locality.is_empty() {
            localities.insert(record.locality.as_str());
        }
    }
    FilterOptions {
        types: with_total(types),
        localities: with_total(localities),
    }
}

fn with_total(values: BTreeSet<&str>) -> Vec<String> {
    std::iter::once(TOTAL_FILTER)
        .chain(values.into_iter().filter(|v| *v != TOTAL_FILTER))
        .map(str::to_string)
        .collect()
}
