use axum::{
    extract::{Query, State},
    response::Json,
};
use axum_valid::Valid;
use common::{CityCount, LocationCount, MapPoint};
use compute::geography::{customer_locations, map_points, top_cities};
use tracing::{debug, instrument};

use crate::helpers::filters::{scoped_dataset, view_cache_key, HandlerError};
#[allow(unused_imports)]
use crate::schemas::ErrorResponse;
use crate::schemas::{ApiResponse, AppState, CachedData, TopQuery, ViewQuery};

/// Distinct customers per state and city
#[utoipa::path(
    get,
    path = "/api/v1/geography/locations",
    tag = "geography",
    params(ViewQuery),
    responses(
        (status = 200, description = "Customer locations retrieved successfully", body = ApiResponse<Vec<LocationCount>>),
        (status = 400, description = "Invalid filter", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_customer_locations(
    Query(query): Query<ViewQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<LocationCount>>>, HandlerError> {
    let filter = query.to_filter();
    let cache_key = view_cache_key("locations", &filter);

    if let Some(CachedData::Locations(locations)) = state.cache.get(&cache_key).await {
        let response = ApiResponse {
            data: locations,
            message: "Customer locations retrieved from cache".to_string(),
            success: true,
        };
        return Ok(Json(response));
    }

    let dataset = scoped_dataset(&state, &filter)?;
    let locations = customer_locations(&dataset);

    state
        .cache
        .insert(cache_key, CachedData::Locations(locations.clone()))
        .await;

    let response = ApiResponse {
        data: locations,
        message: "Customer locations retrieved successfully".to_string(),
        success: true,
    };

    Ok(Json(response))
}

/// Cities with the most distinct customers
#[utoipa::path(
    get,
    path = "/api/v1/geography/cities/top",
    tag = "geography",
    params(TopQuery),
    responses(
        (status = 200, description = "Top cities retrieved successfully", body = ApiResponse<Vec<CityCount>>),
        (status = 400, description = "Invalid filter or limit", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_top_cities(
    Valid(Query(query)): Valid<Query<TopQuery>>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CityCount>>>, HandlerError> {
    let filter = query.to_filter();
    let limit = query.limit.unwrap_or(state.settings.top_limit);
    let cache_key = view_cache_key(&format!("cities_{}", limit), &filter);

    if let Some(CachedData::Cities(cities)) = state.cache.get(&cache_key).await {
        let response = ApiResponse {
            data: cities,
            message: "Top cities retrieved from cache".to_string(),
            success: true,
        };
        return Ok(Json(response));
    }

    let dataset = scoped_dataset(&state, &filter)?;
    let cities = top_cities(&dataset, limit);

    state
        .cache
        .insert(cache_key, CachedData::Cities(cities.clone()))
        .await;

    let response = ApiResponse {
        data: cities,
        message: "Top cities retrieved successfully".to_string(),
        success: true,
    };

    Ok(Json(response))
}

/// One map point per order, placed at the median coordinates of the
/// customer's zip code prefix
#[utoipa::path(
    get,
    path = "/api/v1/geography/points",
    tag = "geography",
    params(ViewQuery),
    responses(
        (status = 200, description = "Map points retrieved successfully", body = ApiResponse<Vec<MapPoint>>),
        (status = 400, description = "Invalid filter", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_map_points(
    Query(query): Query<ViewQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<MapPoint>>>, HandlerError> {
    let filter = query.to_filter();
    let cache_key = view_cache_key("points", &filter);

    if let Some(CachedData::Points(points)) = state.cache.get(&cache_key).await {
        let response = ApiResponse {
            data: points,
            message: "Map points retrieved from cache".to_string(),
            success: true,
        };
        return Ok(Json(response));
    }

    let dataset = scoped_dataset(&state, &filter)?;
    let points = map_points(&dataset);
    debug!("Placed {} orders on the map", points.len());

    state
        .cache
        .insert(cache_key, CachedData::Points(points.clone()))
        .await;

    let response = ApiResponse {
        data: points,
        message: "Map points retrieved successfully".to_string(),
        success: true,
    };

    Ok(Json(response))
}
