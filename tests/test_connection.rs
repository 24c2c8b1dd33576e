//! Connection integration tests: CSV loading, introspection, raw SQL execution.

mod common;

use ecommerce_analytics::{AnalyticsError, Connection};
use serde::Deserialize;
use std::io::Write;
use tempfile::NamedTempFile;

fn sample_connection() -> (Connection, tempfile::TempDir) {
    let tmp = common::sample_data_dir();
    let conn = Connection::new().unwrap();
    conn.load_csv_dir(tmp.path()).unwrap();
    (conn, tmp)
}

// ---------------------------------------------------------------------------
// load_csv_dir
// ---------------------------------------------------------------------------

#[test]
fn load_csv_dir_registers_every_table() {
    let (conn, _tmp) = sample_connection();
    assert_eq!(
        conn.tables(),
        vec!["customers", "order_items", "orders", "products", "reviews"]
    );
}

#[test]
fn load_csv_dir_skips_missing_optional_files() {
    let tmp = common::minimal_data_dir();
    let conn = Connection::new().unwrap();
    conn.load_csv_dir(tmp.path()).unwrap();

    assert_eq!(conn.tables(), vec!["order_items", "orders"]);
    assert!(!conn.has_table("reviews"));
}

#[test]
fn load_csv_dir_fails_without_required_file() {
    let tmp = tempfile::tempdir().unwrap();
    common::write_file(tmp.path(), "orders_dataset.csv", common::ORDERS_CSV);

    let conn = Connection::new().unwrap();
    let err = conn.load_csv_dir(tmp.path()).unwrap_err();
    assert!(matches!(err, AnalyticsError::NotFound(_)));
    assert!(err.to_string().contains("order_items_dataset.csv"));
}

// ---------------------------------------------------------------------------
// columns / has_columns
// ---------------------------------------------------------------------------

#[test]
fn columns_follow_csv_header_order() {
    let (conn, _tmp) = sample_connection();
    assert_eq!(
        conn.columns("order_items").unwrap(),
        vec!["order_id", "order_item_id", "product_id", "price"]
    );
}

#[test]
fn columns_of_unregistered_table_is_empty() {
    let conn = Connection::new().unwrap();
    assert!(conn.columns("orders").unwrap().is_empty());
    assert!(!conn.has_columns("orders", &["order_id"]).unwrap());
}

#[test]
fn has_columns_requires_every_column() {
    let (conn, _tmp) = sample_connection();
    assert!(conn
        .has_columns("products", &["product_id", "product_category_name"])
        .unwrap());
    assert!(!conn
        .has_columns("products", &["product_id", "product_weight_g"])
        .unwrap());
}

// ---------------------------------------------------------------------------
// execute / execute_scalar / execute_into
// ---------------------------------------------------------------------------

#[test]
fn execute_returns_correct_rows() {
    let (conn, _tmp) = sample_connection();

    let rows = conn
        .execute("SELECT customer_id, customer_state FROM customers ORDER BY customer_id", &[])
        .unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["customer_id"], "c1");
    assert_eq!(rows[2]["customer_state"], "TX");
}

#[test]
fn execute_with_params() {
    let (conn, _tmp) = sample_connection();

    let rows = conn
        .execute(
            "SELECT * FROM orders WHERE order_status = ?",
            &["delivered".to_string()],
        )
        .unwrap();
    assert_eq!(rows.len(), 6);
}

#[test]
fn execute_returns_empty_for_no_matches() {
    let (conn, _tmp) = sample_connection();

    let rows = conn
        .execute(
            "SELECT * FROM orders WHERE order_id = ?",
            &["nonexistent".to_string()],
        )
        .unwrap();
    assert!(rows.is_empty());
}

#[test]
fn execute_maps_null_to_json_null() {
    let (conn, _tmp) = sample_connection();

    let rows = conn
        .execute(
            "SELECT product_category_name FROM products WHERE product_id = ?",
            &["p4".to_string()],
        )
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0]["product_category_name"].is_null());
}

#[test]
fn execute_scalar_returns_single_value() {
    let (conn, _tmp) = sample_connection();

    let result = conn
        .execute_scalar("SELECT COUNT(*) FROM order_items", &[])
        .unwrap();
    assert_eq!(result.unwrap().as_i64().unwrap(), 8);
}

#[test]
fn execute_scalar_returns_none_for_empty_result() {
    let (conn, _tmp) = sample_connection();

    let result = conn
        .execute_scalar(
            "SELECT order_id FROM orders WHERE order_id = ?",
            &["nonexistent".to_string()],
        )
        .unwrap();
    assert!(result.is_none());
}

#[derive(Debug, Deserialize)]
struct ItemRow {
    order_id: String,
    price: f64,
}

#[test]
fn execute_into_deserializes_rows() {
    let (conn, _tmp) = sample_connection();

    let items: Vec<ItemRow> = conn
        .execute_into(
            "SELECT order_id, CAST(price AS DOUBLE) AS price FROM order_items \
             WHERE order_id = ? ORDER BY order_item_id",
            &["o1".to_string()],
        )
        .unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].order_id, "o1");
    assert_eq!(items[0].price, 100.0);
    assert_eq!(items[1].price, 50.0);
}

#[test]
fn invalid_sql_is_a_duckdb_error() {
    let conn = Connection::new().unwrap();
    let err = conn.execute("SELECT * FROM missing_table", &[]).unwrap_err();
    assert!(matches!(err, AnalyticsError::DuckDb(_)));
}

// ---------------------------------------------------------------------------
// register_table_from_ndjson
// ---------------------------------------------------------------------------

#[test]
fn register_table_from_ndjson() {
    let mut tmp = NamedTempFile::new().unwrap();
    writeln!(tmp, r#"{{"order_id":"x1","review_score":4}}"#).unwrap();
    writeln!(tmp, r#"{{"order_id":"x2","review_score":2}}"#).unwrap();
    tmp.flush().unwrap();

    let conn = Connection::new().unwrap();
    conn.register_table_from_ndjson("reviews", tmp.path()).unwrap();

    assert!(conn.has_table("reviews"));
    assert!(conn.has_columns("reviews", &["order_id", "review_score"]).unwrap());
    let avg = conn
        .execute_scalar("SELECT AVG(review_score) FROM reviews", &[])
        .unwrap()
        .unwrap();
    assert_eq!(avg.as_f64().unwrap(), 3.0);
}

#[test]
fn reregistering_a_table_replaces_it() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("customers.csv");
    std::fs::write(&path, "customer_id,customer_state\nc1,CA\n").unwrap();

    let conn = Connection::new().unwrap();
    conn.register_table_from_csv("customers", &path).unwrap();
    std::fs::write(&path, "customer_id,customer_state\nc1,CA\nc2,NY\n").unwrap();
    conn.register_table_from_csv("customers", &path).unwrap();

    let count = conn
        .execute_scalar("SELECT COUNT(*) FROM customers", &[])
        .unwrap()
        .unwrap();
    assert_eq!(count.as_i64().unwrap(), 2);
    assert_eq!(conn.tables(), vec!["customers"]);
}
