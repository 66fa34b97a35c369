use axum::{
    extract::{Query, State},
    response::Json,
};
use common::ReviewDistribution;
use compute::reviews::review_distribution;
use tracing::instrument;

use crate::helpers::filters::{scoped_dataset, view_cache_key, HandlerError};
#[allow(unused_imports)]
use crate::schemas::ErrorResponse;
use crate::schemas::{ApiResponse, AppState, CachedData, ViewQuery};

/// Review count per score, always five buckets
#[utoipa::path(
    get,
    path = "/api/v1/reviews/distribution",
    tag = "reviews",
    params(ViewQuery),
    responses(
        (status = 200, description = "Review distribution retrieved successfully", body = ApiResponse<ReviewDistribution>),
        (status = 400, description = "Invalid filter", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_review_distribution(
    Query(query): Query<ViewQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ReviewDistribution>>, HandlerError> {
    let filter = query.to_filter();
    let cache_key = view_cache_key("reviews", &filter);

    if let Some(CachedData::Reviews(distribution)) = state.cache.get(&cache_key).await {
        let response = ApiResponse {
            data: distribution,
            message: "Review distribution retrieved from cache".to_string(),
            success: true,
        };
        return Ok(Json(response));
    }

    let dataset = scoped_dataset(&state, &filter)?;
    let distribution = review_distribution(&dataset);

    state
        .cache
        .insert(cache_key, CachedData::Reviews(distribution.clone()))
        .await;

    let response = ApiResponse {
        data: distribution,
        message: "Review distribution retrieved successfully".to_string(),
        success: true,
    };

    Ok(Json(response))
}
