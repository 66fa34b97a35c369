use crate::handlers::{
    dashboard::{get_dashboard, get_dataset_bounds, index},
    delivery::get_delivery_status,
    geography::{get_customer_locations, get_map_points, get_top_cities},
    health::health_check,
    overview::get_overview,
    payments::get_payment_distribution,
    products::{get_top_categories, get_top_products},
    reviews::get_review_distribution,
};
use crate::schemas::{ApiDoc, AppState};
use axum::{routing::get, Router};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.settings.request_timeout_secs);

    Router::new()
        // Dashboard page
        .route("/", get(index))
        // Health check
        .route("/health", get(health_check))
        // Dataset metadata and full report
        .route("/api/v1/dataset/bounds", get(get_dataset_bounds))
        .route("/api/v1/dashboard", get(get_dashboard))
        // Sales views
        .route("/api/v1/overview", get(get_overview))
        .route("/api/v1/products/top", get(get_top_products))
        .route("/api/v1/categories/top", get(get_top_categories))
        // Payment, delivery and review views
        .route("/api/v1/payments/distribution", get(get_payment_distribution))
        .route("/api/v1/delivery/status", get(get_delivery_status))
        .route("/api/v1/reviews/distribution", get(get_review_distribution))
        // Geography views
        .route("/api/v1/geography/locations", get(get_customer_locations))
        .route("/api/v1/geography/cities/top", get(get_top_cities))
        .route("/api/v1/geography/points", get(get_map_points))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(timeout))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
