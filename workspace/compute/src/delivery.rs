use common::converters::share;
use common::DeliveryStatus;
use model::Dataset;
use tracing::{debug, instrument};

/// Classifies delivered orders as on time or late.
///
/// An order is on time when its actual delivery timestamp is not after the
/// estimate. Orders without an actual delivery are not part of either bucket.
/// Delivered orders without an estimate are counted as excluded.
#[instrument(skip(dataset), fields(orders = dataset.orders.len()))]
pub fn delivery_status(dataset: &Dataset) -> DeliveryStatus {
    let mut on_time_count = 0u64;
    let mut late_count = 0u64;
    let mut excluded_count = 0u64;

    for order in dataset.orders.iter().filter(|o| o.delivered_at.is_some()) {
        match order.delivered_on_time() {
            Some(true) => on_time_count += 1,
            Some(false) => late_count += 1,
            None => excluded_count += 1,
        }
    }

    if excluded_count > 0 {
        debug!(
            "{} delivered orders have no delivery estimate",
            excluded_count
        );
    }

    let classified = on_time_count + late_count;

    DeliveryStatus {
        on_time_count,
        late_count,
        excluded_count,
        on_time_proportion: share(on_time_count, classified),
        late_proportion: share(late_count, classified),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{order, sample_dataset};

    #[test]
    fn test_before_equal_after_estimate() {
        let dataset = Dataset {
            orders: vec![
                order(
                    "before",
                    "c1",
                    "delivered",
                    "2018-01-01 00:00:00",
                    Some("2018-01-10 00:00:00"),
                    Some("2018-01-09 00:00:00"),
                ),
                order(
                    "equal",
                    "c2",
                    "delivered",
                    "2018-01-01 00:00:00",
                    Some("2018-01-10 00:00:00"),
                    Some("2018-01-10 00:00:00"),
                ),
                order(
                    "after",
                    "c3",
                    "delivered",
                    "2018-01-01 00:00:00",
                    Some("2018-01-10 00:00:00"),
                    Some("2018-01-11 00:00:00"),
                ),
            ],
            ..Dataset::default()
        };

        let status = delivery_status(&dataset);

        assert_eq!(status.on_time_count, 2);
        assert_eq!(status.late_count, 1);
        assert!((status.on_time_proportion - 2.0 / 3.0).abs() < 1e-9);
        assert!((status.late_proportion - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_undelivered_orders_are_excluded() {
        let dataset = sample_dataset();
        let delivered = dataset
            .orders
            .iter()
            .filter(|o| o.delivered_at.is_some())
            .count() as u64;

        let status = delivery_status(&dataset);

        // o4 has not been delivered yet
        assert_eq!(status.on_time_count + status.late_count, delivered);
        assert_eq!(status.on_time_count, 2);
        assert_eq!(status.late_count, 1);
        assert_eq!(status.excluded_count, 0);
    }

    #[test]
    fn test_missing_estimate_is_not_applicable() {
        let dataset = Dataset {
            orders: vec![order(
                "o1",
                "c1",
                "delivered",
                "2018-01-01 00:00:00",
                None,
                Some("2018-01-05 00:00:00"),
            )],
            ..Dataset::default()
        };

        let status = delivery_status(&dataset);

        assert_eq!(status.on_time_count, 0);
        assert_eq!(status.late_count, 0);
        assert_eq!(status.excluded_count, 1);
        assert_eq!(status.on_time_proportion, 0.0);
    }

    #[test]
    fn test_empty_dataset() {
        assert_eq!(delivery_status(&Dataset::default()), DeliveryStatus::default());
    }
}
