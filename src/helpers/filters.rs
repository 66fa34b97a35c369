use axum::{http::StatusCode, response::Json};
use model::{DashboardFilter, Dataset, DatasetError};
use tracing::{error, warn};

use crate::schemas::{AppState, ErrorResponse};

/// Error half of every view handler's result
pub type HandlerError = (StatusCode, Json<ErrorResponse>);

/// Cache key for a view computed under a filter
pub fn view_cache_key(view: &str, filter: &DashboardFilter) -> String {
    format!("{}_{}", view, filter.cache_key())
}

/// Restrict the shared dataset to the orders selected by `filter`
pub fn scoped_dataset(state: &AppState, filter: &DashboardFilter) -> Result<Dataset, HandlerError> {
    state.dataset.filtered(filter).map_err(dataset_error)
}

/// Map a dataset error into an HTTP error response
pub fn dataset_error(err: DatasetError) -> HandlerError {
    match err {
        DatasetError::InvalidFilter(message) => {
            warn!("Rejected filter: {}", message);
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: message,
                    code: "INVALID_FILTER".to_string(),
                    success: false,
                }),
            )
        }
        other => internal_error(other),
    }
}

pub fn internal_error(err: impl std::fmt::Display) -> HandlerError {
    error!("Failed to compute view: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: err.to_string(),
            code: "INTERNAL_ERROR".to_string(),
            success: false,
        }),
    )
}
