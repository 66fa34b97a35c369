//! Customer geography views: counts per city and map points.

use std::collections::{HashMap, HashSet};

use common::{CityCount, LocationCount, MapPoint};
use model::entities::Customer;
use model::Dataset;
use tracing::{debug, instrument};

/// Customer records referenced by at least one order.
///
/// Customers without orders and orders without a customer record are both
/// left out.
fn ordering_customers(dataset: &Dataset) -> Vec<&Customer> {
    let by_id: HashMap<&str, &Customer> = dataset
        .customers
        .iter()
        .map(|c| (c.customer_id.as_str(), c))
        .collect();

    let mut seen: HashSet<&str> = HashSet::new();
    dataset
        .orders
        .iter()
        .filter(|order| seen.insert(order.customer_id.as_str()))
        .filter_map(|order| by_id.get(order.customer_id.as_str()).copied())
        .collect()
}

/// Counts distinct customers with orders per (state, city).
///
/// Ordered by count descending, then state and city ascending.
#[instrument(skip(dataset), fields(orders = dataset.orders.len()))]
pub fn customer_locations(dataset: &Dataset) -> Vec<LocationCount> {
    let mut people: HashMap<(&str, &str), HashSet<&str>> = HashMap::new();
    for customer in ordering_customers(dataset) {
        people
            .entry((customer.state.as_str(), customer.city.as_str()))
            .or_default()
            .insert(customer.customer_unique_id.as_str());
    }

    let mut locations: Vec<LocationCount> = people
        .into_iter()
        .map(|((state, city), ids)| LocationCount {
            state: state.to_string(),
            city: city.to_string(),
            customers: ids.len() as u64,
        })
        .collect();

    locations.sort_by(|a, b| {
        b.customers
            .cmp(&a.customers)
            .then_with(|| a.state.cmp(&b.state))
            .then_with(|| a.city.cmp(&b.city))
    });
    locations
}

/// Ranks cities by distinct customers with orders, ties by city name.
#[instrument(skip(dataset), fields(orders = dataset.orders.len()))]
pub fn top_cities(dataset: &Dataset, limit: usize) -> Vec<CityCount> {
    let mut people: HashMap<&str, HashSet<&str>> = HashMap::new();
    for customer in ordering_customers(dataset) {
        people
            .entry(customer.city.as_str())
            .or_default()
            .insert(customer.customer_unique_id.as_str());
    }

    let mut cities: Vec<CityCount> = people
        .into_iter()
        .map(|(city, ids)| CityCount {
            city: city.to_string(),
            customers: ids.len() as u64,
        })
        .collect();

    cities.sort_by(|a, b| b.customers.cmp(&a.customers).then_with(|| a.city.cmp(&b.city)));
    cities.truncate(limit);
    cities
}

/// Places each order's customer on the map.
///
/// Geolocation samples are reduced to the median latitude and longitude per
/// zip code prefix. One point is emitted per distinct order, in dataset
/// order. Orders whose customer or zip prefix is unknown produce no point.
#[instrument(skip(dataset), fields(orders = dataset.orders.len(), geolocations = dataset.geolocations.len()))]
pub fn map_points(dataset: &Dataset) -> Vec<MapPoint> {
    let centers = zip_centers(dataset);
    let customers: HashMap<&str, _> = dataset
        .customers
        .iter()
        .map(|c| (c.customer_id.as_str(), c))
        .collect();

    let mut seen: HashSet<&str> = HashSet::new();
    let mut points = Vec::new();
    let mut unplaced = 0usize;

    for order in &dataset.orders {
        if !seen.insert(order.order_id.as_str()) {
            continue;
        }
        let placed = customers
            .get(order.customer_id.as_str())
            .and_then(|customer| {
                centers
                    .get(customer.zip_code_prefix.as_str())
                    .map(|&(latitude, longitude)| MapPoint {
                        order_id: order.order_id.clone(),
                        city: customer.city.clone(),
                        state: customer.state.clone(),
                        latitude,
                        longitude,
                    })
            });
        match placed {
            Some(point) => points.push(point),
            None => unplaced += 1,
        }
    }

    if unplaced > 0 {
        debug!("{} orders could not be placed on the map", unplaced);
    }

    points
}

/// Median (latitude, longitude) per zip code prefix.
fn zip_centers(dataset: &Dataset) -> HashMap<&str, (f64, f64)> {
    let mut samples: HashMap<&str, (Vec<f64>, Vec<f64>)> = HashMap::new();
    for geo in &dataset.geolocations {
        let entry = samples.entry(geo.zip_code_prefix.as_str()).or_default();
        entry.0.push(geo.latitude);
        entry.1.push(geo.longitude);
    }

    samples
        .into_iter()
        .filter_map(|(zip, (mut latitudes, mut longitudes))| {
            Some((zip, (median(&mut latitudes)?, median(&mut longitudes)?)))
        })
        .collect()
}

fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{customer, order, sample_dataset};

    #[test]
    fn test_customer_locations() {
        let locations = customer_locations(&sample_dataset());

        let summary: Vec<(&str, &str, u64)> = locations
            .iter()
            .map(|l| (l.state.as_str(), l.city.as_str(), l.customers))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("SP", "sao paulo", 2),
                ("MG", "belo horizonte", 1),
                ("RJ", "rio de janeiro", 1),
            ]
        );
    }

    #[test]
    fn test_locations_count_people_not_customer_ids() {
        let mut dataset = sample_dataset();
        // Second customer id of u1, in the same city
        dataset
            .customers
            .push(customer("c9", "u1", "01001", "sao paulo", "SP"));
        dataset.orders.push(order(
            "o9",
            "c9",
            "delivered",
            "2018-03-05 10:00:00",
            None,
            None,
        ));

        let locations = customer_locations(&dataset);

        assert_eq!(locations[0].customers, 2);
    }

    #[test]
    fn test_customers_without_orders_are_not_counted() {
        let mut dataset = sample_dataset();
        dataset
            .customers
            .push(customer("c_none", "u_none", "69005", "manaus", "AM"));

        let locations = customer_locations(&dataset);
        assert_eq!(locations.len(), 3);
        assert!(locations.iter().all(|l| l.city != "manaus"));

        let cities = top_cities(&dataset, 10);
        assert_eq!(cities.len(), 3);
        assert!(cities.iter().all(|c| c.city != "manaus"));
    }

    #[test]
    fn test_top_cities() {
        let cities = top_cities(&sample_dataset(), 2);

        assert_eq!(cities.len(), 2);
        assert_eq!(cities[0].city, "sao paulo");
        assert_eq!(cities[0].customers, 2);
        assert_eq!(cities[1].city, "belo horizonte");
    }

    #[test]
    fn test_map_points_use_median_per_zip() {
        let points = map_points(&sample_dataset());

        // o4's zip prefix has no geolocation samples
        let ids: Vec<&str> = points.iter().map(|p| p.order_id.as_str()).collect();
        assert_eq!(ids, vec!["o1", "o2", "o3"]);

        assert!((points[0].latitude - -23.555).abs() < 1e-9);
        assert!((points[0].longitude - -46.635).abs() < 1e-9);
        assert_eq!(points[1].state, "RJ");
        assert!((points[1].latitude - -22.90).abs() < 1e-9);
    }

    #[test]
    fn test_map_points_one_per_order() {
        let mut dataset = sample_dataset();
        dataset.orders.push(order(
            "o1",
            "c1",
            "delivered",
            "2018-01-05 09:00:00",
            None,
            None,
        ));

        assert_eq!(map_points(&dataset).len(), 3);
    }

    #[test]
    fn test_map_points_without_geolocation() {
        let mut dataset = sample_dataset();
        dataset.geolocations.clear();
        assert!(map_points(&dataset).is_empty());
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&mut []), None);
        assert_eq!(median(&mut [3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&mut [4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }
}
