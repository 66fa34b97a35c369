//! CSV loader for the e-commerce dataset.
//!
//! Every file is read by polars with all columns forced to strings, so that
//! identifiers and zip code prefixes keep their leading zeros. Typed parsing
//! happens here, row by row, so that a malformed cell is reported with its
//! file, line and column.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};

use crate::dataset::Dataset;
use crate::entities::{
    CategoryTranslation, Customer, Geolocation, Order, OrderItem, Payment, Product, Review,
    UNKNOWN_CATEGORY,
};
use crate::error::{DatasetError, Result};

pub const ORDERS_FILE: &str = "orders_dataset.csv";
pub const ORDER_ITEMS_FILE: &str = "order_items_dataset.csv";
pub const PRODUCTS_FILE: &str = "products_dataset.csv";
pub const CUSTOMERS_FILE: &str = "customers_dataset.csv";
pub const PAYMENTS_FILE: &str = "order_payments_dataset.csv";
pub const REVIEWS_FILE: &str = "order_reviews_dataset.csv";
pub const GEOLOCATION_FILE: &str = "geolocation_dataset.csv";
pub const CATEGORY_TRANSLATION_FILE: &str = "product_category_name_translation.csv";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Loads every dataset file from a single directory.
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    data_dir: PathBuf,
}

impl DatasetLoader {
    /// Creates a loader reading from `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Reads and validates the whole dataset.
    ///
    /// Fails on the first missing required file, missing required column or
    /// malformed value. The geolocation and category translation files are
    /// optional and load as empty when absent.
    #[instrument(skip(self), fields(data_dir = %self.data_dir.display()))]
    pub fn load(&self) -> Result<Dataset> {
        info!("Loading dataset from {}", self.data_dir.display());

        let dataset = Dataset {
            orders: self.load_orders()?,
            order_items: self.load_order_items()?,
            products: self.load_products()?,
            customers: self.load_customers()?,
            payments: self.load_payments()?,
            reviews: self.load_reviews()?,
            geolocations: self.load_geolocations()?,
            category_translations: self.load_category_translations()?,
        };

        info!(
            orders = dataset.orders.len(),
            order_items = dataset.order_items.len(),
            products = dataset.products.len(),
            customers = dataset.customers.len(),
            payments = dataset.payments.len(),
            reviews = dataset.reviews.len(),
            geolocations = dataset.geolocations.len(),
            "Dataset loaded"
        );

        Ok(dataset)
    }

    fn load_orders(&self) -> Result<Vec<Order>> {
        let table = self.read_table(
            ORDERS_FILE,
            &[
                "order_id",
                "customer_id",
                "order_status",
                "order_purchase_timestamp",
                "order_estimated_delivery_date",
                "order_delivered_customer_date",
            ],
        )?;
        let order_id = table.column("order_id")?;
        let customer_id = table.column("customer_id")?;
        let status = table.column("order_status")?;
        let purchased_at = table.column("order_purchase_timestamp")?;
        let estimated = table.column("order_estimated_delivery_date")?;
        let delivered = table.column("order_delivered_customer_date")?;

        (0..table.height())
            .map(|row| {
                Ok(Order {
                    order_id: order_id.string(row)?,
                    customer_id: customer_id.string(row)?,
                    status: status.string(row)?,
                    purchased_at: purchased_at.timestamp(row)?,
                    estimated_delivery: estimated.optional_timestamp(row)?,
                    delivered_at: delivered.optional_timestamp(row)?,
                })
            })
            .collect()
    }

    fn load_order_items(&self) -> Result<Vec<OrderItem>> {
        let table = self.read_table(
            ORDER_ITEMS_FILE,
            &["order_id", "order_item_id", "product_id", "price", "freight_value"],
        )?;
        let order_id = table.column("order_id")?;
        let order_item_id = table.column("order_item_id")?;
        let product_id = table.column("product_id")?;
        let price = table.column("price")?;
        let freight_value = table.column("freight_value")?;

        (0..table.height())
            .map(|row| {
                Ok(OrderItem {
                    order_id: order_id.string(row)?,
                    order_item_id: order_item_id.parse(row)?,
                    product_id: product_id.string(row)?,
                    price: price.decimal(row)?,
                    freight_value: freight_value.decimal(row)?,
                })
            })
            .collect()
    }

    fn load_products(&self) -> Result<Vec<Product>> {
        let table = self.read_table(PRODUCTS_FILE, &["product_id", "product_category_name"])?;
        let product_id = table.column("product_id")?;
        let category = table.column("product_category_name")?;

        (0..table.height())
            .map(|row| {
                Ok(Product {
                    product_id: product_id.string(row)?,
                    category: category
                        .optional(row)
                        .unwrap_or(UNKNOWN_CATEGORY)
                        .to_string(),
                })
            })
            .collect()
    }

    fn load_customers(&self) -> Result<Vec<Customer>> {
        let table = self.read_table(
            CUSTOMERS_FILE,
            &[
                "customer_id",
                "customer_unique_id",
                "customer_zip_code_prefix",
                "customer_city",
                "customer_state",
            ],
        )?;
        let customer_id = table.column("customer_id")?;
        let unique_id = table.column("customer_unique_id")?;
        let zip = table.column("customer_zip_code_prefix")?;
        let city = table.column("customer_city")?;
        let state = table.column("customer_state")?;

        (0..table.height())
            .map(|row| {
                Ok(Customer {
                    customer_id: customer_id.string(row)?,
                    customer_unique_id: unique_id.string(row)?,
                    zip_code_prefix: zip.string(row)?,
                    city: city.string(row)?,
                    state: state.string(row)?,
                })
            })
            .collect()
    }

    fn load_payments(&self) -> Result<Vec<Payment>> {
        let table = self.read_table(PAYMENTS_FILE, &["order_id", "payment_type", "payment_value"])?;
        let order_id = table.column("order_id")?;
        let method = table.column("payment_type")?;
        let value = table.column("payment_value")?;

        (0..table.height())
            .map(|row| {
                Ok(Payment {
                    order_id: order_id.string(row)?,
                    method: method.string(row)?,
                    value: value.decimal(row)?,
                })
            })
            .collect()
    }

    fn load_reviews(&self) -> Result<Vec<Review>> {
        let table = self.read_table(REVIEWS_FILE, &["order_id", "review_score"])?;
        let order_id = table.column("order_id")?;
        let score = table.column("review_score")?;

        (0..table.height())
            .map(|row| {
                Ok(Review {
                    order_id: order_id.string(row)?,
                    score: score.score(row)?,
                })
            })
            .collect()
    }

    fn load_geolocations(&self) -> Result<Vec<Geolocation>> {
        if !self.data_dir.join(GEOLOCATION_FILE).is_file() {
            warn!("{} not found, customer map points will be empty", GEOLOCATION_FILE);
            return Ok(Vec::new());
        }

        let table = self.read_table(
            GEOLOCATION_FILE,
            &[
                "geolocation_zip_code_prefix",
                "geolocation_lat",
                "geolocation_lng",
                "geolocation_city",
                "geolocation_state",
            ],
        )?;
        let zip = table.column("geolocation_zip_code_prefix")?;
        let latitude = table.column("geolocation_lat")?;
        let longitude = table.column("geolocation_lng")?;
        let city = table.column("geolocation_city")?;
        let state = table.column("geolocation_state")?;

        (0..table.height())
            .map(|row| {
                Ok(Geolocation {
                    zip_code_prefix: zip.string(row)?,
                    latitude: latitude.parse(row)?,
                    longitude: longitude.parse(row)?,
                    city: city.string(row)?,
                    state: state.string(row)?,
                })
            })
            .collect()
    }

    fn load_category_translations(&self) -> Result<Vec<CategoryTranslation>> {
        if !self.data_dir.join(CATEGORY_TRANSLATION_FILE).is_file() {
            warn!(
                "{} not found, raw category names will be used",
                CATEGORY_TRANSLATION_FILE
            );
            return Ok(Vec::new());
        }

        let table = self.read_table(
            CATEGORY_TRANSLATION_FILE,
            &["product_category_name", "product_category_name_english"],
        )?;
        let category = table.column("product_category_name")?;
        let english = table.column("product_category_name_english")?;

        (0..table.height())
            .map(|row| {
                Ok(CategoryTranslation {
                    category: category.string(row)?,
                    category_english: english.string(row)?,
                })
            })
            .collect()
    }

    fn read_table(&self, file: &'static str, required: &[&'static str]) -> Result<Table> {
        let path = self.data_dir.join(file);
        if !path.is_file() {
            return Err(DatasetError::MissingFile { path });
        }

        debug!("Reading {}", path.display());
        let frame = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .try_into_reader_with_file_path(Some(path))?
            .finish()?;

        for column in required {
            if frame.get_column_index(column).is_none() {
                return Err(DatasetError::MissingColumn {
                    file,
                    column: *column,
                });
            }
        }

        debug!(rows = frame.height(), "Read {}", file);
        Ok(Table { file, frame })
    }
}

/// Parses `YYYY-MM-DD HH:MM:SS`, falling back to a bare `YYYY-MM-DD` at midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

struct Table {
    file: &'static str,
    frame: DataFrame,
}

impl Table {
    fn height(&self) -> usize {
        self.frame.height()
    }

    fn column(&self, name: &'static str) -> Result<TextColumn<'_>> {
        let column = self
            .frame
            .column(name)
            .map_err(|_| DatasetError::MissingColumn {
                file: self.file,
                column: name,
            })?;

        Ok(TextColumn {
            file: self.file,
            name,
            values: column.str()?,
        })
    }
}

/// A string column with typed, row-addressed accessors.
struct TextColumn<'a> {
    file: &'static str,
    name: &'static str,
    values: &'a StringChunked,
}

impl<'a> TextColumn<'a> {
    /// Trimmed cell value; empty cells are null.
    fn optional(&self, row: usize) -> Option<&'a str> {
        self.values
            .get(row)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    fn required(&self, row: usize) -> Result<&'a str> {
        self.optional(row)
            .ok_or_else(|| self.invalid(row, "", "value is required"))
    }

    fn string(&self, row: usize) -> Result<String> {
        self.required(row).map(str::to_string)
    }

    fn parse<T>(&self, row: usize) -> Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = self.required(row)?;
        raw.parse::<T>()
            .map_err(|e| self.invalid(row, raw, e.to_string()))
    }

    fn decimal(&self, row: usize) -> Result<Decimal> {
        let raw = self.required(row)?;
        Decimal::from_str(raw).map_err(|e| self.invalid(row, raw, e.to_string()))
    }

    fn timestamp(&self, row: usize) -> Result<NaiveDateTime> {
        let raw = self.required(row)?;
        parse_timestamp(raw).ok_or_else(|| self.invalid(row, raw, "expected YYYY-MM-DD HH:MM:SS"))
    }

    fn optional_timestamp(&self, row: usize) -> Result<Option<NaiveDateTime>> {
        match self.optional(row) {
            Some(raw) => parse_timestamp(raw)
                .map(Some)
                .ok_or_else(|| self.invalid(row, raw, "expected YYYY-MM-DD HH:MM:SS")),
            None => Ok(None),
        }
    }

    fn score(&self, row: usize) -> Result<u8> {
        let raw = self.required(row)?;
        match raw.parse::<u8>() {
            Ok(score) if (1..=5).contains(&score) => Ok(score),
            _ => Err(self.invalid(row, raw, "review score must be an integer between 1 and 5")),
        }
    }

    fn invalid(&self, row: usize, value: &str, reason: impl Into<String>) -> DatasetError {
        DatasetError::InvalidValue {
            file: self.file,
            // 1-based, after the header line
            line: row + 2,
            column: self.name,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
