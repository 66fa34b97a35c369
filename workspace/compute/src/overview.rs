use std::collections::{HashMap, HashSet};

use common::OverviewMetrics;
use model::Dataset;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

/// Computes the headline numbers of the dashboard.
///
/// Customers are counted by their unique id, so a person who placed several
/// orders counts once. An order whose customer record is missing is counted
/// under its raw customer id. Revenue is price plus freight over every order
/// line. All figures are zero on an empty dataset.
#[instrument(skip(dataset), fields(orders = dataset.orders.len(), items = dataset.order_items.len()))]
pub fn overview_metrics(dataset: &Dataset) -> OverviewMetrics {
    let unique_ids: HashMap<&str, &str> = dataset
        .customers
        .iter()
        .map(|c| (c.customer_id.as_str(), c.customer_unique_id.as_str()))
        .collect();

    let customers: HashSet<&str> = dataset
        .orders
        .iter()
        .map(|order| {
            let customer_id = order.customer_id.as_str();
            unique_ids.get(customer_id).copied().unwrap_or(customer_id)
        })
        .collect();

    let orders: HashSet<&str> = dataset.orders.iter().map(|o| o.order_id.as_str()).collect();

    let (product_revenue, freight_revenue) = dataset.order_items.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(price, freight), item| (price + item.price, freight + item.freight_value),
    );

    debug!(
        customers = customers.len(),
        orders = orders.len(),
        "Computed overview"
    );

    OverviewMetrics {
        total_customers: customers.len() as u64,
        total_orders: orders.len() as u64,
        total_items: dataset.order_items.len() as u64,
        total_revenue: product_revenue + freight_revenue,
        product_revenue,
        freight_revenue,
    }
}
