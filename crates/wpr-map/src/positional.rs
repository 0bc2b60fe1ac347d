//! Fixed-position layouts for sheets with known structure.

use serde::{Deserialize, Serialize};
use tracing::debug;
use wpr_model::{ColumnRef, FieldMapping};

use crate::error::{MappingError, Result};

/// Zero-based column positions per role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionalLayout {
    pub date: usize,
    pub collaborator: usize,
    pub count: usize,
    #[serde(default, rename = "type")]
    pub kind: Option<usize>,
    #[serde(default)]
    pub locality: Option<usize>,
    #[serde(default)]
    pub demand: Option<usize>,
}

impl PositionalLayout {
    pub fn new(date: usize, collaborator: usize, count: usize) -> Self {
        Self {
            date,
            collaborator,
            count,
            kind: None,
            locality: None,
            demand: None,
        }
    }

    /// Builds a layout from spreadsheet letters (`A`, `B`, ..., `AA`).
    pub fn from_letters(date: &str, collaborator: &str, count: &str) -> Result<Self> {
        Ok(Self::new(
            parse_column_letter(date)?,
            parse_column_letter(collaborator)?,
            parse_column_letter(count)?,
        ))
    }

    /// Largest position the layout refers to.
    pub fn max_index(&self) -> usize {
        [self.kind, self.locality, self.demand]
            .into_iter()
            .flatten()
            .fold(self.date.max(self.collaborator).max(self.count), usize::max)
    }
}

/// Converts a spreadsheet column letter to a zero-based index.
///
/// ```
/// use wpr_map::parse_column_letter;
///
/// assert_eq!(parse_column_letter("A").unwrap(), 0);
/// assert_eq!(parse_column_letter("e").unwrap(), 4);
/// assert_eq!(parse_column_letter("AA").unwrap(), 26);
/// assert!(parse_column_letter("A1").is_err());
/// ```
pub fn parse_column_letter(letters: &str) -> Result<usize> {
    let trimmed = letters.trim();
    if trimmed.is_empty() || trimmed.len() > 3 {
        return Err(MappingError::InvalidColumnLetter(letters.to_string()));
    }
    let mut index = 0usize;
    for ch in trimmed.chars() {
        if !ch.is_ascii_alphabetic() {
            return Err(MappingError::InvalidColumnLetter(letters.to_string()));
        }
        let digit = (ch.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        index = index * 26 + digit;
    }
    Ok(index - 1)
}

/// Inverse of [`parse_column_letter`].
///
/// ```
/// use wpr_map::column_letter;
///
/// assert_eq!(column_letter(0), "A");
/// assert_eq!(column_letter(27), "AB");
/// ```
pub fn column_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut out = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        out.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    out.iter().rev().collect()
}

/// Builds a mapping from fixed positions.
///
/// # Errors
///
/// [`MappingError::StructureTooShort`] when the table has fewer columns than
/// the highest position in the layout.
pub fn resolve_positional(headers: &[String], layout: &PositionalLayout) -> Result<FieldMapping> {
    let required = layout.max_index();
    if required >= headers.len() {
        return Err(MappingError::StructureTooShort {
            required,
            available: headers.len(),
        });
    }

    let column = |index: usize| ColumnRef::new(index, headers[index].clone());
    let mut mapping = FieldMapping::new(
        column(layout.date),
        column(layout.collaborator),
        column(layout.count),
    );
    mapping.kind = layout.kind.map(column);
    mapping.locality = layout.locality.map(column);
    mapping.demand = layout.demand.map(column);

    debug!(
        date = %column_letter(layout.date),
        collaborator = %column_letter(layout.collaborator),
        count = %column_letter(layout.count),
        "positional mapping"
    );
    Ok(mapping)
}
