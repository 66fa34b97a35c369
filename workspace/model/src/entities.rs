//! Entity types of the e-commerce dataset.
//!
//! Every entity mirrors one row of a dataset CSV file. They are loaded once
//! by [`crate::loader::DatasetLoader`] and never mutated afterwards.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

/// Category assigned to products whose category is missing in the dataset.
pub const UNKNOWN_CATEGORY: &str = "outro";

/// A single customer order.
///
/// `delivered_at` is `None` while the order has not reached the customer.
/// `estimated_delivery` is `None` only for malformed rows; such orders are
/// treated as "not applicable" by the delivery view.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub order_id: String,
    pub customer_id: String,
    pub status: String,
    pub purchased_at: NaiveDateTime,
    pub estimated_delivery: Option<NaiveDateTime>,
    pub delivered_at: Option<NaiveDateTime>,
}

impl Order {
    /// Gets the calendar date the order was placed on.
    pub fn purchase_date(&self) -> NaiveDate {
        self.purchased_at.date()
    }

    /// Returns whether the order arrived on or before its estimate.
    ///
    /// `None` when either the actual or the estimated delivery is unknown.
    pub fn delivered_on_time(&self) -> Option<bool> {
        match (self.delivered_at, self.estimated_delivery) {
            (Some(actual), Some(estimated)) => Some(actual <= estimated),
            _ => None,
        }
    }
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub order_id: String,
    pub order_item_id: u32,
    pub product_id: String,
    pub price: Decimal,
    pub freight_value: Decimal,
}

impl OrderItem {
    /// Revenue of the line: price plus freight.
    pub fn revenue(&self) -> Decimal {
        self.price + self.freight_value
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub product_id: String,
    /// Portuguese category name, [`UNKNOWN_CATEGORY`] when missing.
    pub category: String,
}

/// A payment made against an order. An order may be paid in several parts.
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub order_id: String,
    pub method: String,
    pub value: Decimal,
}

/// A customer record.
///
/// The dataset issues a new `customer_id` per order; `customer_unique_id`
/// identifies the person behind them.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub customer_id: String,
    pub customer_unique_id: String,
    pub zip_code_prefix: String,
    pub city: String,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub order_id: String,
    /// Always within 1..=5, enforced by the loader.
    pub score: u8,
}

/// A raw geolocation sample for a zip code prefix.
#[derive(Debug, Clone, PartialEq)]
pub struct Geolocation {
    pub zip_code_prefix: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub state: String,
}

/// Portuguese to English category name.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTranslation {
    pub category: String,
    pub category_english: String,
}
