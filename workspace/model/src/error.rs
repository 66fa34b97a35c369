use std::path::PathBuf;

use thiserror::Error;

/// Error types for loading and slicing the dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    /// A required dataset file does not exist
    #[error("Dataset file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    /// A file was read but lacks a column the pipeline needs
    #[error("Missing required column '{column}' in {file}")]
    MissingColumn { file: &'static str, column: &'static str },

    /// A cell could not be parsed into the expected type
    #[error("Invalid value '{value}' for column '{column}' in {file} at line {line}: {reason}")]
    InvalidValue {
        file: &'static str,
        line: usize,
        column: &'static str,
        value: String,
        reason: String,
    },

    /// The requested filter cannot be applied
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// Error from Polars while reading a CSV file
    #[error("CSV read error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

/// Type alias for Result with DatasetError
pub type Result<T> = std::result::Result<T, DatasetError>;
