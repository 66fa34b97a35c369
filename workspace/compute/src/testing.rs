//! Shared fixtures for the view tests.
//!
//! `sample_dataset` is small enough to verify every view by hand:
//!
//! | order | customer (unique) | status    | estimate   | delivered  | items (price + freight)         |
//! |-------|-------------------|-----------|------------|------------|---------------------------------|
//! | o1    | c1 (u1) SP        | delivered | 2018-01-20 | 2018-01-15 | p1 100+10, p2 50+5              |
//! | o2    | c2 (u2) RJ        | delivered | 2018-02-05 | 2018-02-05 | p2 200+20                       |
//! | o3    | c3 (u4) SP        | delivered | 2018-02-20 | 2018-02-25 | p3 30+5                         |
//! | o4    | c4 (u3) MG        | shipped   | 2018-03-20 | -          | p1 100+15                       |

use std::str::FromStr;

use chrono::NaiveDateTime;
use model::entities::{
    CategoryTranslation, Customer, Geolocation, Order, OrderItem, Payment, Product, Review,
};
use model::Dataset;
use rust_decimal::Decimal;

pub fn at(timestamp: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S").unwrap()
}

pub fn money(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

pub fn order(
    order_id: &str,
    customer_id: &str,
    status: &str,
    purchased: &str,
    estimated: Option<&str>,
    delivered: Option<&str>,
) -> Order {
    Order {
        order_id: order_id.to_string(),
        customer_id: customer_id.to_string(),
        status: status.to_string(),
        purchased_at: at(purchased),
        estimated_delivery: estimated.map(at),
        delivered_at: delivered.map(at),
    }
}

pub fn item(order_id: &str, line: u32, product_id: &str, price: &str, freight: &str) -> OrderItem {
    OrderItem {
        order_id: order_id.to_string(),
        order_item_id: line,
        product_id: product_id.to_string(),
        price: money(price),
        freight_value: money(freight),
    }
}

pub fn product(product_id: &str, category: &str) -> Product {
    Product {
        product_id: product_id.to_string(),
        category: category.to_string(),
    }
}

pub fn customer(customer_id: &str, unique_id: &str, zip: &str, city: &str, state: &str) -> Customer {
    Customer {
        customer_id: customer_id.to_string(),
        customer_unique_id: unique_id.to_string(),
        zip_code_prefix: zip.to_string(),
        city: city.to_string(),
        state: state.to_string(),
    }
}

pub fn payment(order_id: &str, method: &str, value: &str) -> Payment {
    Payment {
        order_id: order_id.to_string(),
        method: method.to_string(),
        value: money(value),
    }
}

pub fn review(order_id: &str, score: u8) -> Review {
    Review {
        order_id: order_id.to_string(),
        score,
    }
}

pub fn geolocation(zip: &str, latitude: f64, longitude: f64) -> Geolocation {
    Geolocation {
        zip_code_prefix: zip.to_string(),
        latitude,
        longitude,
        city: String::new(),
        state: String::new(),
    }
}

pub fn sample_dataset() -> Dataset {
    Dataset {
        orders: vec![
            order(
                "o1",
                "c1",
                "delivered",
                "2018-01-05 09:00:00",
                Some("2018-01-20 00:00:00"),
                Some("2018-01-15 14:00:00"),
            ),
            order(
                "o2",
                "c2",
                "delivered",
                "2018-01-20 18:30:00",
                Some("2018-02-05 00:00:00"),
                Some("2018-02-05 00:00:00"),
            ),
            order(
                "o3",
                "c3",
                "delivered",
                "2018-02-10 11:15:00",
                Some("2018-02-20 00:00:00"),
                Some("2018-02-25 16:40:00"),
            ),
            order(
                "o4",
                "c4",
                "shipped",
                "2018-03-01 08:00:00",
                Some("2018-03-20 00:00:00"),
                None,
            ),
        ],
        order_items: vec![
            item("o1", 1, "p1", "100.00", "10.00"),
            item("o1", 2, "p2", "50.00", "5.00"),
            item("o2", 1, "p2", "200.00", "20.00"),
            item("o3", 1, "p3", "30.00", "5.00"),
            item("o4", 1, "p1", "100.00", "15.00"),
        ],
        products: vec![
            product("p1", "beleza_saude"),
            product("p2", "informatica_acessorios"),
            product("p3", "outro"),
        ],
        customers: vec![
            customer("c1", "u1", "01001", "sao paulo", "SP"),
            customer("c2", "u2", "20040", "rio de janeiro", "RJ"),
            customer("c3", "u4", "01001", "sao paulo", "SP"),
            customer("c4", "u3", "30110", "belo horizonte", "MG"),
        ],
        payments: vec![
            payment("o1", "credit_card", "165.00"),
            payment("o2", "credit_card", "220.00"),
            payment("o3", "boleto", "35.00"),
            payment("o4", "voucher", "50.00"),
            payment("o4", "credit_card", "65.00"),
        ],
        reviews: vec![
            review("o1", 5),
            review("o2", 4),
            review("o3", 1),
            review("o4", 5),
        ],
        geolocations: vec![
            geolocation("01001", -23.55, -46.63),
            geolocation("01001", -23.56, -46.64),
            geolocation("20040", -22.90, -43.17),
        ],
        category_translations: vec![
            CategoryTranslation {
                category: "beleza_saude".to_string(),
                category_english: "health_beauty".to_string(),
            },
            CategoryTranslation {
                category: "informatica_acessorios".to_string(),
                category_english: "computers_accessories".to_string(),
            },
        ],
    }
}
