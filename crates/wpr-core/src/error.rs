use thiserror::Error;
use wpr_ingest::IngestError;
use wpr_map::MappingError;
use wpr_normalization::NormalizationError;

/// Failures that stop a dataset from loading.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Normalization(#[from] NormalizationError),
}

impl CoreError {
    /// Short message suitable for showing to the person running the report.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Ingest(err) => err.user_message().to_string(),
            Self::Mapping(err) => format!("The table layout was not recognized: {err}."),
            Self::Normalization(_) => "The column mapping does not fit this table.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
