//! Per-collaborator support (demand) tables.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;
use wpr_common::normalize_label;
use wpr_model::{
    DemandMode, EMPTY_DEMAND, NormalizedRecord, PeriodWindow, SupportRow, SupportTable, monday_of,
};

/// How many distinct values each half of an automatic label lists.
const AUTO_LABEL_TOP: usize = 2;

/// Key of a manually entered demand tag.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DemandKey {
    pub week_start: NaiveDate,
    pub collaborator: String,
    pub date: NaiveDate,
}

impl DemandKey {
    /// The week is derived from `date`, so a tag stays attached to its day
    /// whichever window is on screen.
    pub fn new(collaborator: &str, date: NaiveDate) -> Self {
        Self {
            week_start: monday_of(date),
            collaborator: normalize_label(collaborator),
            date,
        }
    }
}

/// Manual demand tags entered during a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemandStore {
    tags: BTreeMap<DemandKey, String>,
}

impl DemandStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a tag. A blank or `-` tag removes the entry instead.
    pub fn set(&mut self, key: DemandKey, tag: &str) {
        let tag = tag.trim();
        if tag.is_empty() || tag == EMPTY_DEMAND {
            self.tags.remove(&key);
        } else {
            self.tags.insert(key, tag.to_string());
        }
    }

    pub fn get(&self, key: &DemandKey) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    pub fn remove(&mut self, key: &DemandKey) -> Option<String> {
        self.tags.remove(key)
    }

    /// Drops every tag of one week; returns how many were removed.
    pub fn clear_week(&mut self, week_start: NaiveDate) -> usize {
        let before = self.tags.len();
        self.tags.retain(|key, _| key.week_start != week_start);
        before - self.tags.len()
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DemandKey, &str)> {
        self.tags.iter().map(|(key, tag)| (key, tag.as_str()))
    }
}

/// Builds one table per collaborator with one row per weekday of `window`.
///
/// `records` are the candidates for automatic and column labels; only those of
/// the row's collaborator and date are used.
pub fn build_support_tables(
    records: &[NormalizedRecord],
    window: &PeriodWindow,
    collaborators: &[String],
    mode: DemandMode,
    store: &DemandStore,
) -> Vec<SupportTable> {
    let days = window.days();
    let mut by_day: BTreeMap<(&str, NaiveDate), Vec<&NormalizedRecord>> = BTreeMap::new();
    if mode != DemandMode::Manual {
        for record in records.iter().filter(|r| window.contains(r.date)) {
            if let Some(name) = record.collaborator.as_deref() {
                by_day.entry((name, record.date)).or_default().push(record);
            }
        }
    }

    let tables: Vec<SupportTable> = collaborators
        .iter()
        .map(|collaborator| {
            let rows = days
                .iter()
                .map(|&date| {
                    let day_records = by_day
                        .get(&(collaborator.as_str(), date))
                        .map_or(&[][..], Vec::as_slice);
                    let demand = match mode {
                        DemandMode::Manual => store
                            .get(&DemandKey::new(collaborator, date))
                            .unwrap_or(EMPTY_DEMAND)
                            .to_string(),
                        DemandMode::Auto => auto_demand_label(day_records.iter().copied()),
                        DemandMode::Column => column_demand_label(day_records.iter().copied()),
                    };
                    SupportRow {
                        date,
                        weekday: date.weekday().num_days_from_monday(),
                        demand,
                    }
                })
                .collect();
            SupportTable {
                collaborator: collaborator.clone(),
                week_start: monday_of(window.start),
                rows,
            }
        })
        .collect();

    debug!(tables = tables.len(), ?mode, "built support tables");
    tables
}

/// `"TIPO: x, y | LOCAL: a, b"` from the most frequent values of the day.
///
/// Frequency is by row; ties are alphabetical. A half with no values renders
/// as `-`, and the whole label is `-` when both halves are empty.
pub fn auto_demand_label<'a>(records: impl IntoIterator<Item = &'a NormalizedRecord>) -> String {
    let mut kinds: BTreeMap<&str, usize> = BTreeMap::new();
    let mut localities: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        if !record.kind.is_empty() {
            *kinds.entry(record.kind.as_str()).or_default() += 1;
        }
        if !record.locality.is_empty() {
            *localities.entry(record.locality.as_str()).or_default() += 1;
        }
    }
    if kinds.is_empty() && localities.is_empty() {
        return EMPTY_DEMAND.to_string();
    }
    format!(
        "TIPO: {} | LOCAL: {}",
        most_frequent(kinds),
        most_frequent(localities)
    )
}

fn most_frequent(counts: BTreeMap<&str, usize>) -> String {
    if counts.is_empty() {
        return EMPTY_DEMAND.to_string();
    }
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(AUTO_LABEL_TOP)
        .map(|(value, _)| value)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Distinct free-text demands of the day, in first-seen order.
fn column_demand_label<'a>(records: impl IntoIterator<Item = &'a NormalizedRecord>) -> String {
    let mut seen = BTreeSet::new();
    let values: Vec<&str> = records
        .into_iter()
        .map(|record| record.demand.as_str())
        .filter(|demand| !demand.is_empty() && seen.insert(*demand))
        .collect();
    if values.is_empty() {
        EMPTY_DEMAND.to_string()
    } else {
        values.join("; ")
    }
}
