//! Dashboard views computed from an in-memory [`Dataset`].
//!
//! Every view is a pure function of the (already filtered) dataset. Use
//! [`default_report`] to apply a [`DashboardFilter`] and compute all of them
//! at once.

pub mod delivery;
pub mod error;
pub mod frames;
pub mod geography;
pub mod overview;
pub mod payments;
pub mod products;
pub mod reviews;

#[cfg(test)]
mod testing;

use common::{DashboardReport, DateRange};
use model::{Dataset, DashboardFilter};
use tracing::{info, instrument};

use error::Result;

/// Knobs for [`default_report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Maximum number of rows in the ranked views (products, categories, cities).
    pub top_limit: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            top_limit: products::DEFAULT_TOP_LIMIT,
        }
    }
}

/// Computes every dashboard view over the orders selected by `filter`.
///
/// Fails only when the filter itself is invalid.
#[instrument(skip(dataset), fields(orders = dataset.orders.len()))]
pub fn default_report(
    dataset: &Dataset,
    filter: &DashboardFilter,
    options: &ReportOptions,
) -> Result<DashboardReport> {
    let scoped = dataset.filtered(filter)?;

    let report = DashboardReport {
        period: scoped
            .purchase_date_bounds()
            .map(|(start, end)| DateRange::new(start, end)),
        status: filter.status.clone(),
        overview: overview::overview_metrics(&scoped),
        top_products: products::top_products(&scoped, options.top_limit),
        top_categories: products::top_categories(&scoped, options.top_limit),
        payments: payments::payment_distribution(&scoped),
        delivery: delivery::delivery_status(&scoped),
        locations: geography::customer_locations(&scoped),
        top_cities: geography::top_cities(&scoped, options.top_limit),
        reviews: reviews::review_distribution(&scoped),
    };

    info!(
        orders = report.overview.total_orders,
        revenue = %report.overview.total_revenue,
        "Computed dashboard report"
    );

    Ok(report)
}
