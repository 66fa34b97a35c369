//! Product and category revenue rankings.

use std::collections::HashMap;

use common::{CategoryRevenue, ProductRevenue};
use model::Dataset;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

/// Number of entries returned by the ranking views by default.
pub const DEFAULT_TOP_LIMIT: usize = 10;

/// Maps each product id to its display category.
///
/// Uses the English translation when one exists, otherwise the raw category
/// name (already `outro` for products without a category).
pub fn category_labels(dataset: &Dataset) -> HashMap<&str, &str> {
    let translations: HashMap<&str, &str> = dataset
        .category_translations
        .iter()
        .map(|t| (t.category.as_str(), t.category_english.as_str()))
        .collect();

    dataset
        .products
        .iter()
        .map(|product| {
            let category = product.category.as_str();
            let label = translations.get(category).copied().unwrap_or(category);
            (product.product_id.as_str(), label)
        })
        .collect()
}

/// Ranks products by revenue (price plus freight), highest first.
///
/// Ties are broken by product id ascending. Returns at most `limit` entries,
/// fewer when the dataset has fewer distinct products. Order lines that
/// reference an unknown product are left out.
#[instrument(skip(dataset), fields(items = dataset.order_items.len()))]
pub fn top_products(dataset: &Dataset, limit: usize) -> Vec<ProductRevenue> {
    let labels = category_labels(dataset);

    let mut totals: HashMap<&str, (u64, Decimal)> = HashMap::new();
    let mut unknown = 0usize;
    for item in &dataset.order_items {
        if !labels.contains_key(item.product_id.as_str()) {
            unknown += 1;
            continue;
        }
        let entry = totals
            .entry(item.product_id.as_str())
            .or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 += item.revenue();
    }

    if unknown > 0 {
        debug!("Skipped {} order items with an unknown product", unknown);
    }

    let mut ranked: Vec<ProductRevenue> = totals
        .into_iter()
        .map(|(product_id, (quantity_sold, revenue))| ProductRevenue {
            product_id: product_id.to_string(),
            category: labels.get(product_id).copied().unwrap_or_default().to_string(),
            quantity_sold,
            revenue,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.revenue
            .cmp(&a.revenue)
            .then_with(|| a.product_id.cmp(&b.product_id))
    });
    ranked.truncate(limit);
    ranked
}

/// Ranks product categories by revenue, highest first.
///
/// Ties are broken by category name ascending.
#[instrument(skip(dataset), fields(items = dataset.order_items.len()))]
pub fn top_categories(dataset: &Dataset, limit: usize) -> Vec<CategoryRevenue> {
    let labels = category_labels(dataset);

    let mut totals: HashMap<&str, (u64, Decimal)> = HashMap::new();
    for item in &dataset.order_items {
        let Some(category) = labels.get(item.product_id.as_str()) else {
            continue;
        };
        let entry = totals.entry(*category).or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 += item.revenue();
    }

    let mut ranked: Vec<CategoryRevenue> = totals
        .into_iter()
        .map(|(category, (quantity_sold, revenue))| CategoryRevenue {
            category: category.to_string(),
            quantity_sold,
            revenue,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.revenue
            .cmp(&a.revenue)
            .then_with(|| a.category.cmp(&b.category))
    });
    ranked.truncate(limit);
    ranked
}
