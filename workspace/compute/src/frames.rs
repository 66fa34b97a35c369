//! Conversion of computed views into polars DataFrames.
//!
//! The CLI uses these frames to export a report as one CSV file per view.
//! Money columns are exported as `f64`.

use common::{
    CategoryRevenue, CityCount, DashboardReport, DeliveryStatus, LocationCount,
    OverviewMetrics, PaymentDistribution, ProductRevenue, ReviewDistribution,
};
use polars::prelude::*;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::instrument;

use crate::error::Result;

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

pub fn overview_frame(overview: &OverviewMetrics) -> Result<DataFrame> {
    let df = DataFrame::new(vec![
        Series::new("total_customers".into(), vec![overview.total_customers]).into(),
        Series::new("total_orders".into(), vec![overview.total_orders]).into(),
        Series::new("total_items".into(), vec![overview.total_items]).into(),
        Series::new("total_revenue".into(), vec![to_f64(overview.total_revenue)]).into(),
        Series::new("product_revenue".into(), vec![to_f64(overview.product_revenue)]).into(),
        Series::new("freight_revenue".into(), vec![to_f64(overview.freight_revenue)]).into(),
    ])?;
    Ok(df)
}

pub fn products_frame(products: &[ProductRevenue]) -> Result<DataFrame> {
    let df = DataFrame::new(vec![
        Series::new(
            "product_id".into(),
            products.iter().map(|p| p.product_id.as_str()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "category".into(),
            products.iter().map(|p| p.category.as_str()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "quantity_sold".into(),
            products.iter().map(|p| p.quantity_sold).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "revenue".into(),
            products.iter().map(|p| to_f64(p.revenue)).collect::<Vec<_>>(),
        )
        .into(),
    ])?;
    Ok(df)
}

pub fn categories_frame(categories: &[CategoryRevenue]) -> Result<DataFrame> {
    let df = DataFrame::new(vec![
        Series::new(
            "category".into(),
            categories.iter().map(|c| c.category.as_str()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "quantity_sold".into(),
            categories.iter().map(|c| c.quantity_sold).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "revenue".into(),
            categories.iter().map(|c| to_f64(c.revenue)).collect::<Vec<_>>(),
        )
        .into(),
    ])?;
    Ok(df)
}

pub fn payments_frame(payments: &PaymentDistribution) -> Result<DataFrame> {
    let methods = &payments.methods;
    let df = DataFrame::new(vec![
        Series::new(
            "method".into(),
            methods.iter().map(|m| m.method.as_str()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "count".into(),
            methods.iter().map(|m| m.count).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "proportion".into(),
            methods.iter().map(|m| m.proportion).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "total_value".into(),
            methods.iter().map(|m| to_f64(m.total_value)).collect::<Vec<_>>(),
        )
        .into(),
    ])?;
    Ok(df)
}

pub fn delivery_frame(delivery: &DeliveryStatus) -> Result<DataFrame> {
    let df = DataFrame::new(vec![
        Series::new("status".into(), vec!["on_time", "late"]).into(),
        Series::new(
            "count".into(),
            vec![delivery.on_time_count, delivery.late_count],
        )
        .into(),
        Series::new(
            "proportion".into(),
            vec![delivery.on_time_proportion, delivery.late_proportion],
        )
        .into(),
    ])?;
    Ok(df)
}

pub fn locations_frame(locations: &[LocationCount]) -> Result<DataFrame> {
    let df = DataFrame::new(vec![
        Series::new(
            "state".into(),
            locations.iter().map(|l| l.state.as_str()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "city".into(),
            locations.iter().map(|l| l.city.as_str()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "customers".into(),
            locations.iter().map(|l| l.customers).collect::<Vec<_>>(),
        )
        .into(),
    ])?;
    Ok(df)
}

pub fn cities_frame(cities: &[CityCount]) -> Result<DataFrame> {
    let df = DataFrame::new(vec![
        Series::new(
            "city".into(),
            cities.iter().map(|c| c.city.as_str()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "customers".into(),
            cities.iter().map(|c| c.customers).collect::<Vec<_>>(),
        )
        .into(),
    ])?;
    Ok(df)
}

pub fn reviews_frame(reviews: &ReviewDistribution) -> Result<DataFrame> {
    let buckets = &reviews.buckets;
    let df = DataFrame::new(vec![
        Series::new(
            "score".into(),
            buckets.iter().map(|b| b.score as i32).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "count".into(),
            buckets.iter().map(|b| b.count).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "proportion".into(),
            buckets.iter().map(|b| b.proportion).collect::<Vec<_>>(),
        )
        .into(),
    ])?;
    Ok(df)
}

/// Converts every view of a report into a named frame.
///
/// Names are stable and suitable as file stems.
#[instrument(skip(report))]
pub fn report_frames(report: &DashboardReport) -> Result<Vec<(&'static str, DataFrame)>> {
    Ok(vec![
        ("overview", overview_frame(&report.overview)?),
        ("top_products", products_frame(&report.top_products)?),
        ("top_categories", categories_frame(&report.top_categories)?),
        ("payment_methods", payments_frame(&report.payments)?),
        ("delivery_status", delivery_frame(&report.delivery)?),
        ("customer_locations", locations_frame(&report.locations)?),
        ("top_cities", cities_frame(&report.top_cities)?),
        ("review_scores", reviews_frame(&report.reviews)?),
    ])
}
