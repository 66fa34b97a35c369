use axum::{
    extract::{Query, State},
    response::{Html, Json},
};
use axum_valid::Valid;
use common::{DashboardReport, DateRange};
use compute::error::ComputeError;
use compute::{default_report, ReportOptions};
use tracing::{info, instrument};

use crate::helpers::filters::{dataset_error, internal_error, view_cache_key, HandlerError};
#[allow(unused_imports)]
use crate::schemas::ErrorResponse;
use crate::schemas::{ApiResponse, AppState, CachedData, DatasetBounds, TopQuery};

/// Browser dashboard rendering every view
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../assets/dashboard.html"))
}

/// Every view computed under one filter
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "dashboard",
    params(TopQuery),
    responses(
        (status = 200, description = "Dashboard report retrieved successfully", body = ApiResponse<DashboardReport>),
        (status = 400, description = "Invalid filter or limit", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_dashboard(
    Valid(Query(query)): Valid<Query<TopQuery>>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DashboardReport>>, HandlerError> {
    let filter = query.to_filter();
    let options = ReportOptions {
        top_limit: query.limit.unwrap_or(state.settings.top_limit),
    };
    let cache_key = view_cache_key(&format!("report_{}", options.top_limit), &filter);

    if let Some(CachedData::Report(report)) = state.cache.get(&cache_key).await {
        let response = ApiResponse {
            data: report,
            message: "Dashboard report retrieved from cache".to_string(),
            success: true,
        };
        return Ok(Json(response));
    }

    let report = default_report(&state.dataset, &filter, &options).map_err(|e| match e {
        ComputeError::Dataset(err) => dataset_error(err),
        other => internal_error(other),
    })?;
    info!(orders = report.overview.total_orders, "Dashboard report computed");

    state
        .cache
        .insert(cache_key, CachedData::Report(report.clone()))
        .await;

    let response = ApiResponse {
        data: report,
        message: "Dashboard report retrieved successfully".to_string(),
        success: true,
    };

    Ok(Json(response))
}

/// Purchase date range and order statuses present in the dataset
#[utoipa::path(
    get,
    path = "/api/v1/dataset/bounds",
    tag = "dashboard",
    responses(
        (status = 200, description = "Dataset bounds retrieved successfully", body = ApiResponse<DatasetBounds>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_dataset_bounds(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DatasetBounds>>, HandlerError> {
    let bounds = DatasetBounds {
        period: state
            .dataset
            .purchase_date_bounds()
            .map(|(start, end)| DateRange::new(start, end)),
        statuses: state.dataset.order_statuses(),
        total_orders: state.dataset.orders.len() as u64,
    };

    let response = ApiResponse {
        data: bounds,
        message: "Dataset bounds retrieved successfully".to_string(),
        success: true,
    };

    Ok(Json(response))
}
