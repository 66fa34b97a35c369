use std::sync::Arc;

use chrono::NaiveDate;
use common::{
    CategoryRevenue, CityCount, DashboardReport, DateRange, DeliveryStatus, LocationCount,
    MapPoint, OverviewMetrics, PaymentDistribution, PaymentMethodShare, ProductRevenue,
    ReviewBucket, ReviewDistribution,
};
use model::{DashboardFilter, Dataset};
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, OpenApi, ToSchema};
use validator::Validate;

use crate::config::Settings;

pub use common::ApiResponse;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Dataset loaded at startup, never mutated
    pub dataset: Arc<Dataset>,
    /// Cache for computed views, keyed by view and filter
    pub cache: Cache<String, CachedData>,
    /// Runtime tunables
    pub settings: Arc<Settings>,
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    Overview(OverviewMetrics),
    Products(Vec<ProductRevenue>),
    Categories(Vec<CategoryRevenue>),
    Payments(PaymentDistribution),
    Delivery(DeliveryStatus),
    Locations(Vec<LocationCount>),
    Cities(Vec<CityCount>),
    Points(Vec<MapPoint>),
    Reviews(ReviewDistribution),
    Report(DashboardReport),
}

/// Query parameters shared by every view endpoint
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ViewQuery {
    /// First purchase date to include (YYYY-MM-DD)
    pub start_date: Option<NaiveDate>,
    /// Last purchase date to include (YYYY-MM-DD)
    pub end_date: Option<NaiveDate>,
    /// Keep only orders with this status (e.g. delivered)
    pub status: Option<String>,
}

impl ViewQuery {
    pub fn to_filter(&self) -> DashboardFilter {
        DashboardFilter::new(self.start_date, self.end_date, self.status.clone())
    }
}

/// Query parameters for ranked views
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct TopQuery {
    /// First purchase date to include (YYYY-MM-DD)
    pub start_date: Option<NaiveDate>,
    /// Last purchase date to include (YYYY-MM-DD)
    pub end_date: Option<NaiveDate>,
    /// Keep only orders with this status (e.g. delivered)
    pub status: Option<String>,
    /// Number of rows to return (default: configured top limit)
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<usize>,
}

impl TopQuery {
    pub fn to_filter(&self) -> DashboardFilter {
        DashboardFilter::new(self.start_date, self.end_date, self.status.clone())
    }
}

/// What the loaded dataset covers, used to initialise filter controls
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DatasetBounds {
    /// First and last purchase date, absent for an empty dataset
    pub period: Option<DateRange>,
    /// Distinct order statuses, sorted
    pub statuses: Vec<String>,
    pub total_orders: u64,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Number of orders in the loaded dataset
    pub orders: u64,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::dashboard::get_dataset_bounds,
        crate::handlers::dashboard::get_dashboard,
        crate::handlers::overview::get_overview,
        crate::handlers::products::get_top_products,
        crate::handlers::products::get_top_categories,
        crate::handlers::payments::get_payment_distribution,
        crate::handlers::delivery::get_delivery_status,
        crate::handlers::geography::get_customer_locations,
        crate::handlers::geography::get_top_cities,
        crate::handlers::geography::get_map_points,
        crate::handlers::reviews::get_review_distribution,
    ),
    components(
        schemas(
            ApiResponse<OverviewMetrics>,
            ApiResponse<Vec<ProductRevenue>>,
            ApiResponse<Vec<CategoryRevenue>>,
            ApiResponse<PaymentDistribution>,
            ApiResponse<DeliveryStatus>,
            ApiResponse<Vec<LocationCount>>,
            ApiResponse<Vec<CityCount>>,
            ApiResponse<Vec<MapPoint>>,
            ApiResponse<ReviewDistribution>,
            ApiResponse<DashboardReport>,
            ApiResponse<DatasetBounds>,
            ErrorResponse,
            HealthResponse,
            ViewQuery,
            TopQuery,
            DatasetBounds,
            DateRange,
            OverviewMetrics,
            ProductRevenue,
            CategoryRevenue,
            PaymentDistribution,
            PaymentMethodShare,
            DeliveryStatus,
            LocationCount,
            CityCount,
            MapPoint,
            ReviewBucket,
            ReviewDistribution,
            DashboardReport,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "dashboard", description = "Full report and dataset metadata"),
        (name = "sales", description = "Revenue and product ranking views"),
        (name = "payments", description = "Payment method views"),
        (name = "delivery", description = "Delivery performance views"),
        (name = "geography", description = "Customer geography views"),
        (name = "reviews", description = "Customer satisfaction views"),
    ),
    info(
        title = "Ecomdash API",
        description = "E-commerce dashboard API - aggregate views over an orders dataset",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
