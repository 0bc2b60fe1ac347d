use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("period start {start} is after end {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
}

pub type Result<T> = std::result::Result<T, ModelError>;
