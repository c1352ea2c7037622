use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid value for {field}: {value}")]
    InvalidConfig { field: &'static str, value: String },

    #[error("{child} rows require at least one {parent} row")]
    MissingParents {
        child: &'static str,
        parent: &'static str,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type GenResult<T> = Result<T, GenError>;
