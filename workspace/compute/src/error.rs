use model::DatasetError;
use thiserror::Error;
use tracing::error;

/// Error types for the compute module
#[derive(Error, Debug)]
pub enum ComputeError {
    /// Error from loading or slicing the dataset
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// Error from Polars DataFrame operations
    #[error("DataFrame error: {0}")]
    DataFrame(String),

    /// Error from Polars Series operations
    #[error("Series error: {0}")]
    Series(String),
}

// Implement From<polars::error::PolarsError> for ComputeError
impl From<polars::error::PolarsError> for ComputeError {
    fn from(error: polars::error::PolarsError) -> Self {
        match error {
            polars::error::PolarsError::ShapeMismatch(_) => {
                let err = ComputeError::DataFrame(format!("Shape mismatch: {}", error));
                error!(?err, "DataFrame error: Shape mismatch");
                err
            }
            polars::error::PolarsError::SchemaMismatch(_) => {
                let err = ComputeError::DataFrame(format!("Schema mismatch: {}", error));
                error!(?err, "DataFrame error: Schema mismatch");
                err
            }
            polars::error::PolarsError::Duplicate(_) => {
                let err = ComputeError::DataFrame(format!("Duplicate column: {}", error));
                error!(?err, "DataFrame error: Duplicate column");
                err
            }
            polars::error::PolarsError::ComputeError(_) => {
                let err = ComputeError::DataFrame(format!("Compute error: {}", error));
                error!(?err, "DataFrame error: Compute error");
                err
            }
            _ => {
                let err = ComputeError::Series(format!("Series error: {}", error));
                error!(?err, "Series error");
                err
            }
        }
    }
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
