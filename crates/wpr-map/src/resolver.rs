//! Two-phase name-based resolution.
//!
//! Phase 1 looks for a header equal to a candidate, candidates in order.
//! Phase 2 runs only when phase 1 found nothing: for each candidate in order,
//! the first header (in table order) containing it wins. An exact hit anywhere
//! in the candidate list therefore beats every substring hit, so a generic
//! fragment such as `NOTA` cannot shadow an exact `NOTAS ATENDIDAS` header.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use wpr_common::normalize_label;
use wpr_model::{ColumnRef, FieldMapping, FieldRole};

use crate::candidates::Candidates;
use crate::error::{MappingError, Result};
use crate::positional::{PositionalLayout, resolve_positional};
use crate::suggest::closest_header;

/// How columns are assigned to roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "lowercase")]
pub enum MappingStrategy {
    /// Match header names against candidate lists.
    ByName(Candidates),
    /// Fixed column positions; no name matching.
    Positional(PositionalLayout),
}

impl Default for MappingStrategy {
    fn default() -> Self {
        Self::ByName(Candidates::default())
    }
}

/// Which phase produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Exact,
    Substring,
}

/// A resolved column and how it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleMatch {
    pub column: ColumnRef,
    pub kind: MatchKind,
    /// Normalized candidate that matched.
    pub candidate: String,
}

/// Upper-case and collapse whitespace; the form both sides are compared in.
pub fn normalize_header(raw: &str) -> String {
    normalize_label(raw)
}

/// Finds the column for one role, reporting which phase matched.
pub fn match_role(headers: &[String], candidates: &[String]) -> Option<RoleMatch> {
    let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
    let wanted: Vec<String> = candidates
        .iter()
        .map(|c| normalize_header(c))
        .filter(|c| !c.is_empty())
        .collect();

    let found = |idx: usize, kind: MatchKind, candidate: &str| RoleMatch {
        column: ColumnRef::new(idx, headers[idx].clone()),
        kind,
        candidate: candidate.to_string(),
    };

    for candidate in &wanted {
        if let Some(idx) = normalized.iter().position(|header| header == candidate) {
            return Some(found(idx, MatchKind::Exact, candidate));
        }
    }

    for candidate in &wanted {
        if let Some(idx) = normalized
            .iter()
            .position(|header| header.contains(candidate.as_str()))
        {
            return Some(found(idx, MatchKind::Substring, candidate));
        }
    }

    None
}

/// Finds the column for one role.
pub fn resolve_role(headers: &[String], candidates: &[String]) -> Option<ColumnRef> {
    match_role(headers, candidates).map(|m| m.column)
}

/// Builds a [`FieldMapping`] by name.
///
/// # Errors
///
/// [`MappingError::ColumnNotFound`] when date, collaborator or count cannot
/// be matched. Optional roles resolve to `None` instead.
pub fn resolve_by_name(headers: &[String], candidates: &Candidates) -> Result<FieldMapping> {
    let required = |role: FieldRole| -> Result<ColumnRef> {
        let wanted = candidates.for_role(role);
        match match_role(headers, wanted) {
            Some(found) => {
                debug!(%role, column = %found.column.name, kind = ?found.kind, "resolved column");
                Ok(found.column)
            }
            None => Err(MappingError::ColumnNotFound {
                role,
                candidates: wanted.to_vec(),
                suggestion: closest_header(headers, wanted),
            }),
        }
    };
    let optional = |role: FieldRole| -> Option<ColumnRef> {
        let found = match_role(headers, candidates.for_role(role));
        match &found {
            Some(m) => debug!(%role, column = %m.column.name, kind = ?m.kind, "resolved column"),
            None => debug!(%role, "optional column absent"),
        }
        found.map(|m| m.column)
    };

    let mut mapping = FieldMapping::new(
        required(FieldRole::Date)?,
        required(FieldRole::Collaborator)?,
        required(FieldRole::Count)?,
    );
    mapping.kind = optional(FieldRole::Type);
    mapping.locality = optional(FieldRole::Locality);
    mapping.demand = optional(FieldRole::Demand);

    warn_shared_columns(&mapping);
    Ok(mapping)
}

/// Resolves a mapping with the configured strategy.
pub fn resolve(headers: &[String], strategy: &MappingStrategy) -> Result<FieldMapping> {
    match strategy {
        MappingStrategy::ByName(candidates) => resolve_by_name(headers, candidates),
        MappingStrategy::Positional(layout) => resolve_positional(headers, layout),
    }
}

fn warn_shared_columns(mapping: &FieldMapping) {
    let assigned: Vec<(FieldRole, &ColumnRef)> = mapping
        .entries()
        .filter_map(|(role, column)| column.map(|c| (role, c)))
        .collect();
    for (pos, (role, column)) in assigned.iter().enumerate() {
        for (other_role, other) in &assigned[pos + 1..] {
            if column.index == other.index {
                warn!(
                    column = %column.name,
                    first = %role,
                    second = %other_role,
                    "one column was resolved for two roles"
                );
            }
        }
    }
}
