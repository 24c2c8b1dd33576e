//! SQL builder with parameterized query construction.
//!
//! Filter values (statuses, years, months) go through DuckDB's parameter
//! binding (`?` placeholders), never through string interpolation. Builder
//! methods return `&mut Self` for chaining.
//!
//! # Example
//!
//! ```rust
//! use ecommerce_analytics::SqlBuilder;
//! let (sql, params) = SqlBuilder::new("orders o")
//!     .select(&["o.order_id", "o.order_status"])
//!     .join("JOIN order_items oi ON oi.order_id = o.order_id")
//!     .where_eq("o.order_status", "delivered")
//!     .order_by(&["o.order_id ASC"])
//!     .build();
//! assert_eq!(params, vec!["delivered"]);
//! ```

/// Builds parameterized SQL queries for the data provider.
pub struct SqlBuilder {
    select_cols: Vec<String>,
    is_distinct: bool,
    from_table: String,
    joins: Vec<String>,
    where_clauses: Vec<String>,
    params: Vec<String>,
    order_by_cols: Vec<String>,
}

impl SqlBuilder {
    /// Create a builder targeting the given table, optionally aliased
    /// (e.g. `"orders o"`).
    pub fn new(table: &str) -> Self {
        Self {
            select_cols: vec!["*".to_string()],
            is_distinct: false,
            from_table: table.to_string(),
            joins: Vec::new(),
            where_clauses: Vec::new(),
            params: Vec::new(),
            order_by_cols: Vec::new(),
        }
    }

    /// Set the select expressions (replaces the default `*`).
    pub fn select(&mut self, cols: &[&str]) -> &mut Self {
        self.select_cols = cols.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Append one select expression, keeping those already set.
    pub fn add_select(&mut self, expr: &str) -> &mut Self {
        if self.select_cols.len() == 1 && self.select_cols[0] == "*" {
            self.select_cols.clear();
        }
        self.select_cols.push(expr.to_string());
        self
    }

    /// Add DISTINCT to the SELECT clause.
    pub fn distinct(&mut self) -> &mut Self {
        self.is_distinct = true;
        self
    }

    /// Add a JOIN clause.
    ///
    /// The clause should be a full JOIN expression, e.g.
    /// `"LEFT JOIN products p ON p.product_id = oi.product_id"`.
    pub fn join(&mut self, clause: &str) -> &mut Self {
        self.joins.push(clause.to_string());
        self
    }

    /// Add a WHERE condition with `?` placeholders for each param.
    ///
    /// Parameters are appended in order.
    pub fn where_clause(&mut self, condition: &str, params: &[&str]) -> &mut Self {
        self.where_clauses.push(condition.to_string());
        self.params.extend(params.iter().map(|p| p.to_string()));
        self
    }

    /// Add an equality condition: `{column} = ?`.
    pub fn where_eq(&mut self, column: &str, value: &str) -> &mut Self {
        self.where_clauses.push(format!("{} = ?", column));
        self.params.push(value.to_string());
        self
    }

    /// Add ORDER BY clauses (e.g. `"purchase_year DESC"`).
    pub fn order_by(&mut self, clauses: &[&str]) -> &mut Self {
        self.order_by_cols
            .extend(clauses.iter().map(|c| c.to_string()));
        self
    }

    /// Build the final SQL string and parameter list.
    pub fn build(&self) -> (String, Vec<String>) {
        let distinct = if self.is_distinct { "DISTINCT " } else { "" };
        let cols = self.select_cols.join(", ");
        let mut parts = vec![
            format!("SELECT {}{}", distinct, cols),
            format!("FROM {}", self.from_table),
        ];

        for j in &self.joins {
            parts.push(j.clone());
        }

        if !self.where_clauses.is_empty() {
            parts.push(format!("WHERE {}", self.where_clauses.join(" AND ")));
        }

        if !self.order_by_cols.is_empty() {
            parts.push(format!("ORDER BY {}", self.order_by_cols.join(", ")));
        }

        (parts.join("\n"), self.params.clone())
    }
}
