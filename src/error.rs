//! Error types for the parkstat toolkit

use thiserror::Error;

/// Result type alias for parkstat operations
pub type Result<T> = std::result::Result<T, ParkstatError>;

/// Main error type for the parkstat toolkit
#[derive(Error, Debug)]
pub enum ParkstatError {
    #[error("Data error: {0}")]
    DataError(String),

    #[error("Schema error: {0}")]
    SchemaError(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Coercion failed in column '{column}': {failures} cell(s) not parseable as integer")]
    CoercionError { column: String, failures: usize },

    #[error("Unknown weekday value '{value}' in column '{column}'")]
    UnknownWeekday { column: String, value: String },

    #[error("No rows for year {0}")]
    EmptyYear(i32),
}

impl From<polars::error::PolarsError> for ParkstatError {
    fn from(err: polars::error::PolarsError) -> Self {
        ParkstatError::DataError(err.to_string())
    }
}

impl From<serde_json::Error> for ParkstatError {
    fn from(err: serde_json::Error) -> Self {
        ParkstatError::SerializationError(err.to_string())
    }
}
