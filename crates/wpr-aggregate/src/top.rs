//! Per-collaborator ranking and default selection.

use std::collections::{BTreeMap, BTreeSet};

use wpr_model::{CollaboratorTotal, NormalizedRecord};

/// Sums counts per collaborator and sorts descending, ties alphabetical.
///
/// Records without a collaborator are skipped.
pub fn rank_totals<'a>(records: impl IntoIterator<Item = &'a NormalizedRecord>) -> Vec<CollaboratorTotal> {
    let mut sums: BTreeMap<&str, u64> = BTreeMap::new();
    for record in records {
        if let Some(name) = record.collaborator.as_deref() {
            *sums.entry(name).or_default() += u64::from(record.count);
        }
    }
    let mut totals: Vec<CollaboratorTotal> = sums
        .into_iter()
        .map(|(collaborator, total)| CollaboratorTotal {
            collaborator: collaborator.to_string(),
            total,
        })
        .collect();
    // Stable sort keeps the alphabetical order of the map for equal totals.
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals
}

/// Every collaborator name present in `records`, sorted.
pub fn known_collaborators(records: &[NormalizedRecord]) -> BTreeSet<String> {
    records
        .iter()
        .filter_map(|record| record.collaborator.clone())
        .collect()
}

/// Picks the `n` best-ranked collaborators, padding alphabetically from
/// `known` when fewer than `n` appear in `ranked`.
pub fn top_collaborators(
    ranked: &[CollaboratorTotal],
    known: &BTreeSet<String>,
    n: usize,
) -> Vec<String> {
    let mut selected: Vec<String> = ranked
        .iter()
        .take(n)
        .map(|total| total.collaborator.clone())
        .collect();
    for name in known {
        if selected.len() >= n {
            break;
        }
        if !selected.contains(name) {
            selected.push(name.clone());
        }
    }
    selected
}
