#[cfg(test)]
pub mod test_utils {
    use crate::config::{initialize_app_state, Settings};
    use crate::router::create_router;
    use crate::schemas::AppState;
    use axum::Router;
    use std::fs;
    use std::path::Path;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    const ORDERS: &str = "\
order_id,customer_id,order_status,order_purchase_timestamp,order_approved_at,order_delivered_carrier_date,order_delivered_customer_date,order_estimated_delivery_date
o1,c1,delivered,2018-01-05 09:00:00,2018-01-05 10:00:00,2018-01-08 12:00:00,2018-01-15 14:00:00,2018-01-20 00:00:00
o2,c2,delivered,2018-01-20 18:30:00,2018-01-20 19:00:00,2018-01-25 08:00:00,2018-02-05 00:00:00,2018-02-05 00:00:00
o3,c3,delivered,2018-02-10 11:15:00,2018-02-10 12:00:00,2018-02-12 09:00:00,2018-02-25 16:40:00,2018-02-20 00:00:00
o4,c4,shipped,2018-03-01 08:00:00,2018-03-01 09:00:00,2018-03-03 10:00:00,,2018-03-20 00:00:00
";

    const ORDER_ITEMS: &str = "\
order_id,order_item_id,product_id,seller_id,shipping_limit_date,price,freight_value
o1,1,p1,s1,2018-01-07 09:00:00,100.00,10.00
o1,2,p2,s1,2018-01-07 09:00:00,50.00,5.00
o2,1,p2,s2,2018-01-22 18:30:00,200.00,20.00
o3,1,p3,s2,2018-02-12 11:15:00,30.00,5.00
o4,1,p1,s1,2018-03-03 08:00:00,100.00,15.00
";

    const PRODUCTS: &str = "\
product_id,product_category_name,product_weight_g
p1,beleza_saude,500
p2,informatica_acessorios,1200
p3,,300
";

    const CUSTOMERS: &str = "\
customer_id,customer_unique_id,customer_zip_code_prefix,customer_city,customer_state
c1,u1,01001,sao paulo,SP
c2,u2,20040,rio de janeiro,RJ
c3,u4,01001,sao paulo,SP
c4,u3,30110,belo horizonte,MG
";

    const PAYMENTS: &str = "\
order_id,payment_sequential,payment_type,payment_installments,payment_value
o1,1,credit_card,3,165.00
o2,1,credit_card,1,220.00
o3,1,boleto,1,35.00
o4,1,voucher,1,50.00
o4,2,credit_card,2,65.00
";

    const REVIEWS: &str = "\
review_id,order_id,review_score,review_creation_date
r1,o1,5,2018-01-16 00:00:00
r2,o2,4,2018-02-06 00:00:00
r3,o3,1,2018-02-26 00:00:00
r4,o4,5,2018-03-21 00:00:00
";

    const GEOLOCATIONS: &str = "\
geolocation_zip_code_prefix,geolocation_lat,geolocation_lng,geolocation_city,geolocation_state
01001,-23.55,-46.63,sao paulo,SP
01001,-23.56,-46.64,sao paulo,SP
20040,-22.90,-43.17,rio de janeiro,RJ
";

    const CATEGORY_TRANSLATIONS: &str = "\
product_category_name,product_category_name_english
beleza_saude,health_beauty
informatica_acessorios,computers_accessories
";

    /// Write the fixture dataset (4 orders, 5 items, 3 products) into `dir`
    pub fn write_fixture_dataset(dir: &Path) {
        let files = [
            (model::loader::ORDERS_FILE, ORDERS),
            (model::loader::ORDER_ITEMS_FILE, ORDER_ITEMS),
            (model::loader::PRODUCTS_FILE, PRODUCTS),
            (model::loader::CUSTOMERS_FILE, CUSTOMERS),
            (model::loader::PAYMENTS_FILE, PAYMENTS),
            (model::loader::REVIEWS_FILE, REVIEWS),
            (model::loader::GEOLOCATION_FILE, GEOLOCATIONS),
            (model::loader::CATEGORY_TRANSLATION_FILE, CATEGORY_TRANSLATIONS),
        ];
        for (name, content) in files {
            fs::write(dir.join(name), content).expect("Failed to write fixture file");
        }
    }

    /// Create AppState for testing, backed by the fixture dataset
    pub async fn setup_test_app_state() -> AppState {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        write_fixture_dataset(dir.path());

        initialize_app_state(dir.path(), Settings::default())
            .await
            .expect("Failed to load fixture dataset")
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set.
    ///
    /// # Returns
    ///
    /// A guard that will clean up the subscriber when dropped.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr) // Output to stderr, which is captured by tests
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing
    pub async fn setup_test_app() -> Router {
        let _guard = init_test_tracing();

        let state = setup_test_app_state().await;
        create_router(state)
    }
}
