use axum::{
    extract::{Query, State},
    response::Json,
};
use common::OverviewMetrics;
use compute::overview::overview_metrics;
use tracing::{debug, instrument};

use crate::helpers::filters::{scoped_dataset, view_cache_key, HandlerError};
#[allow(unused_imports)]
use crate::schemas::ErrorResponse;
use crate::schemas::{ApiResponse, AppState, CachedData, ViewQuery};

/// Headline totals: customers, orders, items and revenue
#[utoipa::path(
    get,
    path = "/api/v1/overview",
    tag = "sales",
    params(ViewQuery),
    responses(
        (status = 200, description = "Overview metrics retrieved successfully", body = ApiResponse<OverviewMetrics>),
        (status = 400, description = "Invalid filter", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_overview(
    Query(query): Query<ViewQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<OverviewMetrics>>, HandlerError> {
    let filter = query.to_filter();
    let cache_key = view_cache_key("overview", &filter);

    if let Some(CachedData::Overview(metrics)) = state.cache.get(&cache_key).await {
        let response = ApiResponse {
            data: metrics,
            message: "Overview metrics retrieved from cache".to_string(),
            success: true,
        };
        return Ok(Json(response));
    }

    let dataset = scoped_dataset(&state, &filter)?;
    let metrics = overview_metrics(&dataset);
    debug!(orders = metrics.total_orders, "Computed overview metrics");

    state
        .cache
        .insert(cache_key, CachedData::Overview(metrics.clone()))
        .await;

    let response = ApiResponse {
        data: metrics,
        message: "Overview metrics retrieved successfully".to_string(),
        success: true,
    };

    Ok(Json(response))
}
