use axum::{
    extract::{Query, State},
    response::Json,
};
use common::DeliveryStatus;
use compute::delivery::delivery_status;
use tracing::{debug, instrument};

use crate::helpers::filters::{scoped_dataset, view_cache_key, HandlerError};
#[allow(unused_imports)]
use crate::schemas::ErrorResponse;
use crate::schemas::{ApiResponse, AppState, CachedData, ViewQuery};

/// On-time versus late deliveries
///
/// Only orders with an actual delivery date are classified.
#[utoipa::path(
    get,
    path = "/api/v1/delivery/status",
    tag = "delivery",
    params(ViewQuery),
    responses(
        (status = 200, description = "Delivery status retrieved successfully", body = ApiResponse<DeliveryStatus>),
        (status = 400, description = "Invalid filter", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_delivery_status(
    Query(query): Query<ViewQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DeliveryStatus>>, HandlerError> {
    let filter = query.to_filter();
    let cache_key = view_cache_key("delivery", &filter);

    if let Some(CachedData::Delivery(status)) = state.cache.get(&cache_key).await {
        let response = ApiResponse {
            data: status,
            message: "Delivery status retrieved from cache".to_string(),
            success: true,
        };
        return Ok(Json(response));
    }

    let dataset = scoped_dataset(&state, &filter)?;
    let status = delivery_status(&dataset);
    debug!(
        on_time = status.on_time_count,
        late = status.late_count,
        "Computed delivery status"
    );

    state
        .cache
        .insert(cache_key, CachedData::Delivery(status.clone()))
        .await;

    let response = ApiResponse {
        data: status,
        message: "Delivery status retrieved successfully".to_string(),
        success: true,
    };

    Ok(Json(response))
}
