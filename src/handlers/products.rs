use axum::{
    extract::{Query, State},
    response::Json,
};
use axum_valid::Valid;
use common::{CategoryRevenue, ProductRevenue};
use compute::products::{top_categories, top_products};
use tracing::{debug, instrument};

use crate::helpers::filters::{scoped_dataset, view_cache_key, HandlerError};
#[allow(unused_imports)]
use crate::schemas::ErrorResponse;
use crate::schemas::{ApiResponse, AppState, CachedData, TopQuery};

/// Best selling products by revenue (price + freight)
///
/// Ties are ordered by product id.
#[utoipa::path(
    get,
    path = "/api/v1/products/top",
    tag = "sales",
    params(TopQuery),
    responses(
        (status = 200, description = "Top products retrieved successfully", body = ApiResponse<Vec<ProductRevenue>>),
        (status = 400, description = "Invalid filter or limit", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_top_products(
    Valid(Query(query)): Valid<Query<TopQuery>>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ProductRevenue>>>, HandlerError> {
    let filter = query.to_filter();
    let limit = query.limit.unwrap_or(state.settings.top_limit);
    let cache_key = view_cache_key(&format!("products_{}", limit), &filter);

    if let Some(CachedData::Products(products)) = state.cache.get(&cache_key).await {
        let response = ApiResponse {
            data: products,
            message: "Top products retrieved from cache".to_string(),
            success: true,
        };
        return Ok(Json(response));
    }

    let dataset = scoped_dataset(&state, &filter)?;
    let products = top_products(&dataset, limit);
    debug!("Ranked {} products", products.len());

    state
        .cache
        .insert(cache_key, CachedData::Products(products.clone()))
        .await;

    let response = ApiResponse {
        data: products,
        message: "Top products retrieved successfully".to_string(),
        success: true,
    };

    Ok(Json(response))
}

/// Best selling categories by revenue, English names where known
#[utoipa::path(
    get,
    path = "/api/v1/categories/top",
    tag = "sales",
    params(TopQuery),
    responses(
        (status = 200, description = "Top categories retrieved successfully", body = ApiResponse<Vec<CategoryRevenue>>),
        (status = 400, description = "Invalid filter or limit", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_top_categories(
    Valid(Query(query)): Valid<Query<TopQuery>>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CategoryRevenue>>>, HandlerError> {
    let filter = query.to_filter();
    let limit = query.limit.unwrap_or(state.settings.top_limit);
    let cache_key = view_cache_key(&format!("categories_{}", limit), &filter);

    if let Some(CachedData::Categories(categories)) = state.cache.get(&cache_key).await {
        let response = ApiResponse {
            data: categories,
            message: "Top categories retrieved from cache".to_string(),
            success: true,
        };
        return Ok(Json(response));
    }

    let dataset = scoped_dataset(&state, &filter)?;
    let categories = top_categories(&dataset, limit);

    state
        .cache
        .insert(cache_key, CachedData::Categories(categories.clone()))
        .await;

    let response = ApiResponse {
        data: categories,
        message: "Top categories retrieved successfully".to_string(),
        success: true,
    };

    Ok(Json(response))
}
