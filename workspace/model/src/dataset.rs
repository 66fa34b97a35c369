use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::{debug, instrument};

use crate::entities::{
    CategoryTranslation, Customer, Geolocation, Order, OrderItem, Payment, Product, Review,
};
use crate::error::Result;
use crate::filter::DashboardFilter;

/// The whole dataset, held in memory for the lifetime of the process.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub orders: Vec<Order>,
    pub order_items: Vec<OrderItem>,
    pub products: Vec<Product>,
    pub customers: Vec<Customer>,
    pub payments: Vec<Payment>,
    pub reviews: Vec<Review>,
    pub geolocations: Vec<Geolocation>,
    pub category_translations: Vec<CategoryTranslation>,
}

impl Dataset {
    /// Returns the subset of the dataset selected by `filter`.
    ///
    /// Orders are filtered first. Order items, payments and reviews follow
    /// the kept orders, customers are restricted to those referenced by kept
    /// orders. Reference tables (products, geolocation, translations) are
    /// kept whole.
    #[instrument(skip(self), fields(orders = self.orders.len()))]
    pub fn filtered(&self, filter: &DashboardFilter) -> Result<Dataset> {
        filter.validate()?;

        if filter.is_unbounded() {
            return Ok(self.clone());
        }

        let orders: Vec<Order> = self
            .orders
            .iter()
            .filter(|order| filter.matches(order))
            .cloned()
            .collect();

        let order_ids: HashSet<&str> = orders.iter().map(|o| o.order_id.as_str()).collect();
        let customer_ids: HashSet<&str> = orders.iter().map(|o| o.customer_id.as_str()).collect();

        let order_items = self
            .order_items
            .iter()
            .filter(|item| order_ids.contains(item.order_id.as_str()))
            .cloned()
            .collect();
        let payments = self
            .payments
            .iter()
            .filter(|payment| order_ids.contains(payment.order_id.as_str()))
            .cloned()
            .collect();
        let reviews = self
            .reviews
            .iter()
            .filter(|review| order_ids.contains(review.order_id.as_str()))
            .cloned()
            .collect();
        let customers = self
            .customers
            .iter()
            .filter(|customer| customer_ids.contains(customer.customer_id.as_str()))
            .cloned()
            .collect();

        debug!(
            kept_orders = orders.len(),
            "Filtered dataset from {} orders",
            self.orders.len()
        );

        Ok(Dataset {
            orders,
            order_items,
            products: self.products.clone(),
            customers,
            payments,
            reviews,
            geolocations: self.geolocations.clone(),
            category_translations: self.category_translations.clone(),
        })
    }

    /// Earliest and latest purchase dates, `None` without orders.
    pub fn purchase_date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let dates = self.orders.iter().map(Order::purchase_date);
        let min = dates.clone().min()?;
        let max = dates.max()?;
        Some((min, max))
    }

    /// Distinct order statuses, sorted.
    pub fn order_statuses(&self) -> Vec<String> {
        let mut statuses: Vec<String> = self
            .orders
            .iter()
            .map(|o| o.status.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        statuses.sort();
        statuses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DatasetError;
    use chrono::NaiveDateTime;
    use rust_decimal::Decimal;

    fn order(id: &str, customer: &str, purchased: &str, status: &str) -> Order {
        Order {
            order_id: id.to_string(),
            customer_id: customer.to_string(),
            status: status.to_string(),
            purchased_at: NaiveDateTime::parse_from_str(purchased, "%Y-%m-%d %H:%M:%S").unwrap(),
            estimated_delivery: None,
            delivered_at: None,
        }
    }

    fn customer(id: &str) -> Customer {
        Customer {
            customer_id: id.to_string(),
            customer_unique_id: format!("u-{}", id),
            zip_code_prefix: "01001".to_string(),
            city: "sao paulo".to_string(),
            state: "SP".to_string(),
        }
    }

    fn sample() -> Dataset {
        Dataset {
            orders: vec![
                order("o1", "c1", "2018-01-10 10:00:00", "delivered"),
                order("o2", "c2", "2018-02-10 10:00:00", "delivered"),
                order("o3", "c3", "2018-03-10 10:00:00", "canceled"),
            ],
            order_items: ["o1", "o2", "o3"]
                .iter()
                .map(|id| OrderItem {
                    order_id: id.to_string(),
                    order_item_id: 1,
                    product_id: "p1".to_string(),
                    price: Decimal::new(100, 0),
                    freight_value: Decimal::ZERO,
                })
                .collect(),
            products: vec![Product {
                product_id: "p1".to_string(),
                category: "moveis".to_string(),
            }],
            customers: vec![customer("c1"), customer("c2"), customer("c3")],
            payments: vec![Payment {
                order_id: "o2".to_string(),
                method: "boleto".to_string(),
                value: Decimal::new(100, 0),
            }],
            reviews: vec![Review {
                order_id: "o3".to_string(),
                score: 1,
            }],
            geolocations: vec![],
            category_translations: vec![],
        }
    }

    #[test]
    fn test_filtered_by_date_range() {
        let dataset = sample();
        let filter = DashboardFilter::date_range(
            NaiveDate::from_ymd_opt(2018, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2018, 3, 31).unwrap(),
        );

        let slice = dataset.filtered(&filter).unwrap();

        assert_eq!(slice.orders.len(), 2);
        assert_eq!(slice.order_items.len(), 2);
        assert_eq!(slice.payments.len(), 1);
        assert_eq!(slice.reviews.len(), 1);
        assert_eq!(
            slice.customers.iter().map(|c| c.customer_id.as_str()).collect::<Vec<_>>(),
            vec!["c2", "c3"]
        );
        // Reference tables are untouched
        assert_eq!(slice.products, dataset.products);
    }

    #[test]
    fn test_filtered_by_status() {
        let dataset = sample();
        let filter = DashboardFilter::new(None, None, Some("delivered".to_string()));

        let slice = dataset.filtered(&filter).unwrap();

        assert_eq!(slice.orders.len(), 2);
        assert!(slice.reviews.is_empty());
    }

    #[test]
    fn test_unbounded_filter_keeps_everything() {
        let dataset = sample();
        let slice = dataset.filtered(&DashboardFilter::default()).unwrap();
        assert_eq!(slice, dataset);
    }

    #[test]
    fn test_filtered_rejects_inverted_range() {
        let dataset = sample();
        let filter = DashboardFilter::date_range(
            NaiveDate::from_ymd_opt(2018, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2018, 1, 1).unwrap(),
        );
        assert!(matches!(
            dataset.filtered(&filter),
            Err(DatasetError::InvalidFilter(_))
        ));
    }

    #[test]
    fn test_purchase_date_bounds() {
        assert_eq!(
            sample().purchase_date_bounds(),
            Some((
                NaiveDate::from_ymd_opt(2018, 1, 10).unwrap(),
                NaiveDate::from_ymd_opt(2018, 3, 10).unwrap()
            ))
        );
        assert_eq!(Dataset::default().purchase_date_bounds(), None);
    }

    #[test]
    fn test_order_statuses() {
        assert_eq!(sample().order_statuses(), vec!["canceled", "delivered"]);
    }
}
