//! Data provider: filtered line-item transactions from the loaded dataset.
//!
//! Joins order items to their orders and, where the source files carry them,
//! to product categories, customer regions and review scores. Which of those
//! optional attributes exist is decided once, by schema introspection, and
//! recorded as [`Capabilities`] on every [`TransactionSet`] handed out.

use tracing::debug;

use crate::config;
use crate::connection::Connection;
use crate::error::Result;
use crate::models::{Capabilities, SalesFilter, Transaction, TransactionSet};
use crate::sql_builder::SqlBuilder;

const PURCHASE_TS: &str = "CAST(o.order_purchase_timestamp AS TIMESTAMP)";
const DELIVERED_TS: &str = "TRY_CAST(o.order_delivered_customer_date AS TIMESTAMP)";

/// Inspect the registered tables and report which optional attributes can be joined in.
pub fn detect_capabilities(conn: &Connection) -> Result<Capabilities> {
    let caps = Capabilities {
        has_category: conn.has_columns("products", &["product_id", "product_category_name"])?
            && conn.has_columns("order_items", &["product_id"])?,
        has_region: conn.has_columns("customers", &["customer_id", "customer_state"])?
            && conn.has_columns("orders", &["customer_id"])?,
        has_delivery_time: conn.has_columns("orders", &["order_delivered_customer_date"])?,
        has_review_score: conn.has_columns("reviews", &["order_id", "review_score"])?,
    };
    debug!(?caps, "detected dataset capabilities");
    Ok(caps)
}

// ---------------------------------------------------------------------------
// DataProvider
// ---------------------------------------------------------------------------

/// Query interface over the `orders` / `order_items` tables and their enrichments.
pub struct DataProvider<'a> {
    conn: &'a Connection,
    capabilities: Capabilities,
}

impl<'a> DataProvider<'a> {
    /// Create a provider bound to the given connection, detecting capabilities.
    pub fn new(conn: &'a Connection) -> Result<Self> {
        let capabilities = detect_capabilities(conn)?;
        Ok(Self::with_capabilities(conn, capabilities))
    }

    /// Create a provider with capabilities detected earlier.
    pub fn with_capabilities(conn: &'a Connection, capabilities: Capabilities) -> Self {
        Self { conn, capabilities }
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Distinct purchase years, newest first.
    ///
    /// With `status` set, only orders in that status are considered.
    pub fn available_years(&self, status: Option<&str>) -> Result<Vec<i32>> {
        let mut qb = SqlBuilder::new("orders o");
        qb.select(&[&format!(
            "CAST(EXTRACT(YEAR FROM {}) AS INTEGER) AS purchase_year",
            PURCHASE_TS
        )])
        .distinct()
        .order_by(&["purchase_year DESC"]);

        if let Some(s) = status {
            qb.where_eq("o.order_status", s);
        }

        let (sql, params) = qb.build();
        let rows = self.conn.execute(&sql, &params)?;

        Ok(rows
            .into_iter()
            .filter_map(|r| r.get("purchase_year").and_then(|v| v.as_i64()))
            .map(|y| y as i32)
            .collect())
    }

    /// The year a dashboard opens on: the preferred year if present, else the newest.
    ///
    /// Returns `None` for a dataset without orders.
    pub fn default_year(&self) -> Result<Option<i32>> {
        let years = self.available_years(None)?;
        if years.contains(&config::PREFERRED_YEAR) {
            return Ok(Some(config::PREFERRED_YEAR));
        }
        Ok(years.first().copied())
    }

    /// Line items matching `filter`, ordered by purchase time then order id.
    ///
    /// `delivery_days` is the number of whole days between purchase and
    /// delivery. Review scores are averaged per order before joining, so an
    /// order with several reviews never duplicates its line items.
    pub fn sales_dataset(&self, filter: &SalesFilter) -> Result<TransactionSet> {
        filter.validate()?;
        let caps = self.capabilities;

        let mut qb = SqlBuilder::new("order_items oi");
        qb.select(&[
            "CAST(oi.order_id AS VARCHAR) AS order_id",
            "CAST(oi.price AS DOUBLE) AS price",
            &format!("CAST(EXTRACT(YEAR FROM {}) AS INTEGER) AS purchase_year", PURCHASE_TS),
            &format!("CAST(EXTRACT(MONTH FROM {}) AS INTEGER) AS purchase_month", PURCHASE_TS),
            "CAST(o.order_status AS VARCHAR) AS order_status",
        ]);
        qb.join("JOIN orders o ON o.order_id = oi.order_id");

        if caps.has_category {
            qb.add_select("CAST(p.product_category_name AS VARCHAR) AS product_category_name");
            qb.join("LEFT JOIN products p ON p.product_id = oi.product_id");
        }

        if caps.has_region {
            qb.add_select("CAST(c.customer_state AS VARCHAR) AS customer_state");
            qb.join("LEFT JOIN customers c ON c.customer_id = o.customer_id");
        }

        if caps.has_delivery_time {
            qb.add_select(&format!(
                "FLOOR((epoch({}) - epoch({})) / 86400.0) AS delivery_days",
                DELIVERED_TS, PURCHASE_TS
            ));
        }

        if caps.has_review_score {
            qb.add_select("r.review_score AS review_score");
            qb.join(
                "LEFT JOIN (\
                   SELECT order_id, AVG(CAST(review_score AS DOUBLE)) AS review_score \
                   FROM reviews GROUP BY order_id\
                 ) r ON r.order_id = oi.order_id",
            );
        }

        qb.where_eq("o.order_status", &filter.status);
        qb.where_clause(
            &format!("EXTRACT(YEAR FROM {}) = CAST(? AS INTEGER)", PURCHASE_TS),
            &[&filter.year.to_string()],
        );
        if let Some(month) = filter.month {
            qb.where_clause(
                &format!("EXTRACT(MONTH FROM {}) = CAST(? AS INTEGER)", PURCHASE_TS),
                &[&month.to_string()],
            );
        }
        qb.order_by(&[&format!("{} ASC", PURCHASE_TS), "oi.order_id ASC"]);

        let (sql, params) = qb.build();
        let rows: Vec<Transaction> = self.conn.execute_into(&sql, &params)?;
        debug!(
            year = filter.year,
            month = ?filter.month,
            status = %filter.status,
            rows = rows.len(),
            "loaded sales dataset"
        );

        Ok(TransactionSet::new(rows, caps))
    }
}
