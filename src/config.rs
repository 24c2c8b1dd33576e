use std::collections::HashMap;
use std::path::PathBuf;

/// Order status the dashboard reports on unless told otherwise.
pub const DEFAULT_STATUS: &str = "delivered";

/// Year preselected by [`default_year`](crate::provider::DataProvider::default_year)
/// when the dataset contains it.
pub const PREFERRED_YEAR: i32 = 2023;

/// Headroom applied above the largest monthly revenue on the trend chart axis.
pub const TREND_HEADROOM: f64 = 1.15;

/// Headroom applied above the largest category revenue on the ranking axis.
pub const CATEGORY_HEADROOM: f64 = 1.25;

/// Number of categories kept by the category ranking.
pub const TOP_CATEGORIES: usize = 10;

/// Tables that must be present for the dataset to load at all.
pub const REQUIRED_TABLES: [&str; 2] = ["orders", "order_items"];

pub fn csv_files() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        // Core fact tables
        ("orders", "orders_dataset.csv"),
        ("order_items", "order_items_dataset.csv"),
        // Optional enrichment
        ("products", "products_dataset.csv"),
        ("customers", "customers_dataset.csv"),
        ("reviews", "order_reviews_dataset.csv"),
    ])
}

pub fn default_data_dir() -> PathBuf {
    PathBuf::from("ecommerce_data")
}
