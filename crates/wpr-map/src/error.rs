//! Error types for column resolution.

use thiserror::Error;
use wpr_model::FieldRole;

/// Structural problems that stop the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// No header matches any candidate of a mandatory role.
    #[error("no column found for {role} (tried: {}){}", .candidates.join(", "), hint(.suggestion.as_deref()))]
    ColumnNotFound {
        role: FieldRole,
        candidates: Vec<String>,
        suggestion: Option<String>,
    },

    /// The table is narrower than the positional layout requires.
    #[error("table has {available} columns but the layout needs column {}", .required + 1)]
    StructureTooShort { required: usize, available: usize },

    /// A positional layout entry is not a valid column letter.
    #[error("invalid column letter: {0:?}")]
    InvalidColumnLetter(String),
}

fn hint(suggestion: Option<&str>) -> String {
    suggestion
        .map(|header| format!("; closest header is {header:?}"))
        .unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, MappingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_not_found_message() {
        let err = MappingError::ColumnNotFound {
            role: FieldRole::Count,
            candidates: vec!["NOTAS".to_string(), "QTD".to_string()],
            suggestion: Some("Nota Atend.".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "no column found for count (tried: NOTAS, QTD); closest header is \"Nota Atend.\""
        );
    }

    #[test]
    fn structure_too_short_is_one_based() {
        let err = MappingError::StructureTooShort {
            required: 4,
            available: 3,
        };
        assert_eq!(err.to_string(), "table has 3 columns but the layout needs column 5");
    }
}
