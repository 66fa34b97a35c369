use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Inclusive range of purchase dates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }
}

/// Headline numbers of the dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct OverviewMetrics {
    /// Distinct customers (by unique customer id) who placed an order
    pub total_customers: u64,
    /// Distinct orders
    pub total_orders: u64,
    /// Order lines
    pub total_items: u64,
    /// Sum of price plus freight over all order lines
    #[schema(value_type = String, example = "13591643.70")]
    pub total_revenue: Decimal,
    /// Sum of item prices only
    #[schema(value_type = String, example = "11349418.81")]
    pub product_revenue: Decimal,
    /// Sum of freight values only
    #[schema(value_type = String, example = "2242224.89")]
    pub freight_revenue: Decimal,
}

/// Revenue ranking entry for a single product
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ProductRevenue {
    pub product_id: String,
    /// Category label, English when a translation is available
    pub category: String,
    /// Number of order lines
    pub quantity_sold: u64,
    #[schema(value_type = String, example = "63885.00")]
    pub revenue: Decimal,
}

/// Revenue ranking entry for a product category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CategoryRevenue {
    pub category: String,
    pub quantity_sold: u64,
    #[schema(value_type = String, example = "1441248.07")]
    pub revenue: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct PaymentMethodShare {
    /// Payment method, e.g. `credit_card`
    pub method: String,
    pub count: u64,
    /// Share of all payments, 0.0 to 1.0
    pub proportion: f64,
    #[schema(value_type = String, example = "12542084.19")]
    pub total_value: Decimal,
}

/// Payment methods ordered by count, most used first
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct PaymentDistribution {
    pub total_payments: u64,
    pub methods: Vec<PaymentMethodShare>,
}

/// On-time versus late deliveries
///
/// Only orders with both an actual and an estimated delivery date are
/// classified. Delivered orders lacking an estimate are counted in
/// `excluded_count`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DeliveryStatus {
    pub on_time_count: u64,
    pub late_count: u64,
    pub excluded_count: u64,
    pub on_time_proportion: f64,
    pub late_proportion: f64,
}

/// Customer count for a single city
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct LocationCount {
    pub state: String,
    pub city: String,
    pub customers: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CityCount {
    pub city: String,
    pub customers: u64,
}

/// Position of one order's customer for map plotting
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MapPoint {
    pub order_id: String,
    pub city: String,
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ReviewBucket {
    /// Review score, 1 to 5
    pub score: u8,
    pub count: u64,
    pub proportion: f64,
}

/// Review counts per score; always five buckets, scores 1 to 5 in order
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ReviewDistribution {
    pub total_reviews: u64,
    /// Mean score, absent when there are no reviews
    pub average_score: Option<f64>,
    pub buckets: Vec<ReviewBucket>,
}

/// Every dashboard view computed under one filter
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DashboardReport {
    /// Purchase date range of the selected orders, absent when none match
    pub period: Option<DateRange>,
    /// Order status the report was restricted to
    pub status: Option<String>,
    pub overview: OverviewMetrics,
    pub top_products: Vec<ProductRevenue>,
    pub top_categories: Vec<CategoryRevenue>,
    pub payments: PaymentDistribution,
    pub delivery: DeliveryStatus,
    pub locations: Vec<LocationCount>,
    pub top_cities: Vec<CityCount>,
    pub reviews: ReviewDistribution,
}
