use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizationError {
    /// The mapping points past the end of the table it is applied to.
    #[error("column {index} ({name}) is not present in the table")]
    MissingColumn { index: usize, name: String },
}

pub type Result<T> = std::result::Result<T, NormalizationError>;
