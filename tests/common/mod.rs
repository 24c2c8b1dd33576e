//! Shared test fixtures for the analytics integration tests.
//!
//! `sample_data_dir()` writes a small but complete set of CSV exports into a
//! temp directory. The numbers are chosen so every aggregate can be checked
//! by hand:
//!
//! 2023, delivered:
//! - o1 (Jan, CA): p1 electronics 100.0 + p2 toys 50.0, delivered in 1 day, review 5
//! - o2 (Jan, NY): p3 home 200.0, delivered in 6 days, review 4
//! - o3 (Feb, CA): p1 electronics 300.0, delivered in 12 days, reviews 2 and 4
//! - o5 (Mar, NY): p4 (no category) 25.5, not delivered yet, no review
//!
//! 2023, canceled: o4 (Feb, TX): p2 toys 999.0
//!
//! 2022, delivered:
//! - o6 (Jan, TX): p1 electronics 120.0, delivered in 3 days, review 5
//! - o7 (Mar, CA): p3 home 80.0, delivered in 4 days, no review

#![allow(dead_code)]

use ecommerce_analytics::{Capabilities, Transaction, TransactionSet};
use std::fs;
use std::path::Path;

pub const ORDERS_CSV: &str = "\
order_id,customer_id,order_status,order_purchase_timestamp,order_delivered_customer_date
o1,c1,delivered,2023-01-05 10:00:00,2023-01-07 09:00:00
o2,c2,delivered,2023-01-20 12:00:00,2023-01-26 12:00:00
o3,c1,delivered,2023-02-10 08:00:00,2023-02-22 08:00:00
o4,c3,canceled,2023-02-11 08:00:00,
o5,c2,delivered,2023-03-03 09:30:00,
o6,c3,delivered,2022-01-15 10:00:00,2022-01-18 10:00:00
o7,c1,delivered,2022-03-01 10:00:00,2022-03-05 10:00:00
";

pub const ORDER_ITEMS_CSV: &str = "\
order_id,order_item_id,product_id,price
o1,1,p1,100.0
o1,2,p2,50.0
o2,1,p3,200.0
o3,1,p1,300.0
o4,1,p2,999.0
o5,1,p4,25.5
o6,1,p1,120.0
o7,1,p3,80.0
";

pub const PRODUCTS_CSV: &str = "\
product_id,product_category_name
p1,electronics
p2,toys
p3,home
p4,
";

pub const CUSTOMERS_CSV: &str = "\
customer_id,customer_state
c1,CA
c2,NY
c3,TX
";

pub const REVIEWS_CSV: &str = "\
review_id,order_id,review_score
r1,o1,5
r2,o2,4
r3,o3,2
r4,o3,4
r5,o6,5
";

/// Write the full sample dataset into a fresh temp directory.
///
/// The caller must keep the returned `TempDir` alive for the duration of the
/// test.
pub fn sample_data_dir() -> tempfile::TempDir {
    let tmp = tempfile::tempdir().unwrap();
    write_file(tmp.path(), "orders_dataset.csv", ORDERS_CSV);
    write_file(tmp.path(), "order_items_dataset.csv", ORDER_ITEMS_CSV);
    write_file(tmp.path(), "products_dataset.csv", PRODUCTS_CSV);
    write_file(tmp.path(), "customers_dataset.csv", CUSTOMERS_CSV);
    write_file(tmp.path(), "order_reviews_dataset.csv", REVIEWS_CSV);
    tmp
}

/// Only the two required files, with the delivery column dropped from orders.
pub fn minimal_data_dir() -> tempfile::TempDir {
    let tmp = tempfile::tempdir().unwrap();
    write_file(
        tmp.path(),
        "orders_dataset.csv",
        "\
order_id,customer_id,order_status,order_purchase_timestamp
o1,c1,delivered,2023-01-05 10:00:00
o2,c2,delivered,2023-02-20 12:00:00
",
    );
    write_file(
        tmp.path(),
        "order_items_dataset.csv",
        "\
order_id,order_item_id,product_id,price
o1,1,p1,100.0
o2,1,p2,40.0
",
    );
    tmp
}

pub fn write_file(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

// ---------------------------------------------------------------------------
// In-memory sets for the pure aggregation tests
// ---------------------------------------------------------------------------

pub fn tx(order_id: &str, price: f64, month: u32) -> Transaction {
    Transaction::new(order_id, price, 2023, month, "delivered")
}

pub fn set(rows: Vec<Transaction>) -> TransactionSet {
    TransactionSet::new(rows, Capabilities::all())
}

pub fn set_with(rows: Vec<Transaction>, capabilities: Capabilities) -> TransactionSet {
    TransactionSet::new(rows, capabilities)
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
