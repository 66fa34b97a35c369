use axum::{
    extract::{Query, State},
    response::Json,
};
use common::PaymentDistribution;
use compute::payments::payment_distribution;
use tracing::instrument;

use crate::helpers::filters::{scoped_dataset, view_cache_key, HandlerError};
#[allow(unused_imports)]
use crate::schemas::ErrorResponse;
use crate::schemas::{ApiResponse, AppState, CachedData, ViewQuery};

/// Share of payments per payment method
#[utoipa::path(
    get,
    path = "/api/v1/payments/distribution",
    tag = "payments",
    params(ViewQuery),
    responses(
        (status = 200, description = "Payment distribution retrieved successfully", body = ApiResponse<PaymentDistribution>),
        (status = 400, description = "Invalid filter", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_payment_distribution(
    Query(query): Query<ViewQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<PaymentDistribution>>, HandlerError> {
    let filter = query.to_filter();
    let cache_key = view_cache_key("payments", &filter);

    if let Some(CachedData::Payments(distribution)) = state.cache.get(&cache_key).await {
        let response = ApiResponse {
            data: distribution,
            message: "Payment distribution retrieved from cache".to_string(),
            success: true,
        };
        return Ok(Json(response));
    }

    let dataset = scoped_dataset(&state, &filter)?;
    let distribution = payment_distribution(&dataset);

    state
        .cache
        .insert(cache_key, CachedData::Payments(distribution.clone()))
        .await;

    let response = ApiResponse {
        data: distribution,
        message: "Payment distribution retrieved successfully".to_string(),
        success: true,
    };

    Ok(Json(response))
}
