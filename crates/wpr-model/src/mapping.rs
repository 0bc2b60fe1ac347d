//! Semantic roles and their resolved source columns.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic field a source column can play in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldRole {
    Date,
    Collaborator,
    Count,
    Type,
    Locality,
    Demand,
}

impl FieldRole {
    /// All roles, mandatory ones first.
    pub const ALL: [FieldRole; 6] = [
        FieldRole::Date,
        FieldRole::Collaborator,
        FieldRole::Count,
        FieldRole::Type,
        FieldRole::Locality,
        FieldRole::Demand,
    ];

    /// Roles the pipeline cannot run without.
    pub const MANDATORY: [FieldRole; 3] =
        [FieldRole::Date, FieldRole::Collaborator, FieldRole::Count];

    pub fn is_mandatory(self) -> bool {
        matches!(
            self,
            FieldRole::Date | FieldRole::Collaborator | FieldRole::Count
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldRole::Date => "date",
            FieldRole::Collaborator => "collaborator",
            FieldRole::Count => "count",
            FieldRole::Type => "type",
            FieldRole::Locality => "locality",
            FieldRole::Demand => "demand",
        }
    }
}

impl fmt::Display for FieldRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A concrete column of the raw table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnRef {
    /// Zero-based position in the raw table.
    pub index: usize,
    /// Header text as it appears in the source.
    pub name: String,
}

impl ColumnRef {
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }
}

/// Resolved assignment of semantic roles to source columns.
///
/// Built once per load and never mutated afterwards. The three mandatory
/// roles are plain fields so a mapping without them cannot exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    pub date: ColumnRef,
    pub collaborator: ColumnRef,
    pub count: ColumnRef,
    pub kind: Option<ColumnRef>,
    pub locality: Option<ColumnRef>,
    pub demand: Option<ColumnRef>,
}

impl FieldMapping {
    pub fn new(date: ColumnRef, collaborator: ColumnRef, count: ColumnRef) -> Self {
        Self {
            date,
            collaborator,
            count,
            kind: None,
            locality: None,
            demand: None,
        }
    }

    /// Returns the column assigned to `role`, if any.
    pub fn get(&self, role: FieldRole) -> Option<&ColumnRef> {
        match role {
            FieldRole::Date => Some(&self.date),
            FieldRole::Collaborator => Some(&self.collaborator),
            FieldRole::Count => Some(&self.count),
            FieldRole::Type => self.kind.as_ref(),
            FieldRole::Locality => self.locality.as_ref(),
            FieldRole::Demand => self.demand.as_ref(),
        }
    }

    /// Iterates over every role and its column (absent optional roles yield `None`).
    pub fn entries(&self) -> impl Iterator<Item = (FieldRole, Option<&ColumnRef>)> {
        FieldRole::ALL.into_iter().map(|role| (role, self.get(role)))
    }
}
