//! Common transport-layer types shared between the server and its clients.
//! These structs are the JSON payloads of the dashboard endpoints, so any
//! renderer can deserialize responses without duplicating shapes.

pub mod converters;
mod views;

pub use views::{
    CategoryRevenue, CityCount, DashboardReport, DateRange, DeliveryStatus, LocationCount,
    MapPoint, OverviewMetrics, PaymentDistribution, PaymentMethodShare, ProductRevenue,
    ReviewBucket, ReviewDistribution,
};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper returned by every data endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}
