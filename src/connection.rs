//! DuckDB connection wrapper with table registration and query execution.
//!
//! Raw CSV files are loaded into in-memory tables once per dataset load.
//! Column sets are discovered by schema introspection so the provider can
//! adapt to exports that lack optional columns.

use crate::config;
use crate::error::{AnalyticsError, Result};
use duckdb::{types::ValueRef, Connection as DuckDbConnection};
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info, warn};

/// Wraps a DuckDB connection and tracks which tables have been loaded.
pub struct Connection {
    conn: DuckDbConnection,
    registered_tables: RefCell<HashSet<String>>,
}

impl Connection {
    /// Open an empty in-memory DuckDB database.
    pub fn new() -> Result<Self> {
        let conn = DuckDbConnection::open_in_memory()?;
        Ok(Self {
            conn,
            registered_tables: RefCell::new(HashSet::new()),
        })
    }

    /// Load every known CSV file found in `dir` as a table.
    ///
    /// Fails with [`AnalyticsError::NotFound`] if a required table's file is
    /// missing. Optional files that are missing are skipped with a warning.
    pub fn load_csv_dir(&self, dir: &Path) -> Result<()> {
        let files = config::csv_files();
        let mut names: Vec<&&str> = files.keys().collect();
        names.sort();

        for name in names {
            let path = dir.join(files[*name]);
            if path.exists() {
                self.register_table_from_csv(name, &path)?;
            } else if config::REQUIRED_TABLES.contains(name) {
                return Err(AnalyticsError::NotFound(format!(
                    "Required data file {} is missing",
                    path.display()
                )));
            } else {
                warn!(table = *name, path = %path.display(), "optional data file missing");
            }
        }

        info!(dir = %dir.display(), tables = self.registered_tables.borrow().len(), "dataset loaded");
        Ok(())
    }

    /// Create a DuckDB table from a CSV file with a header row.
    ///
    /// Column types are inferred by DuckDB's sniffer.
    pub fn register_table_from_csv(&self, table_name: &str, csv_path: &Path) -> Result<()> {
        let path = sql_path(csv_path);
        self.conn.execute_batch(&format!(
            "DROP TABLE IF EXISTS {}; \
             CREATE TABLE {} AS SELECT * FROM read_csv_auto('{}', header=true)",
            table_name, table_name, path
        ))?;
        self.registered_tables.borrow_mut().insert(table_name.to_string());
        debug!(table = table_name, path = %path, "registered csv table");
        Ok(())
    }

    /// Create a DuckDB table from a newline-delimited JSON file.
    pub fn register_table_from_ndjson(&self, table_name: &str, ndjson_path: &Path) -> Result<()> {
        let path = sql_path(ndjson_path);
        self.conn.execute_batch(&format!(
            "DROP TABLE IF EXISTS {}; \
             CREATE TABLE {} AS SELECT * FROM read_json_auto('{}', format='newline_delimited')",
            table_name, table_name, path
        ))?;
        self.registered_tables.borrow_mut().insert(table_name.to_string());
        debug!(table = table_name, path = %path, "registered ndjson table");
        Ok(())
    }

    /// Return the column names of a registered table, in schema order.
    ///
    /// Returns an empty vector for tables that were never registered.
    pub fn columns(&self, table_name: &str) -> Result<Vec<String>> {
        if !self.has_table(table_name) {
            return Ok(Vec::new());
        }

        let mut stmt = self.conn.prepare(&format!(
            "SELECT column_name FROM (DESCRIBE SELECT * FROM {})",
            table_name
        ))?;
        let mut rows = stmt.query([])?;
        let mut cols = Vec::new();
        while let Some(row) = rows.next()? {
            let col: String = row.get(0)?;
            cols.push(col);
        }
        Ok(cols)
    }

    /// Check whether `table_name` is registered and has every column in `required`.
    pub fn has_columns(&self, table_name: &str, required: &[&str]) -> Result<bool> {
        let cols = self.columns(table_name)?;
        if cols.is_empty() {
            return Ok(false);
        }
        Ok(required.iter().all(|r| cols.iter().any(|c| c == r)))
    }

    /// Execute SQL and return results as a `Vec` of `HashMap`s.
    ///
    /// DuckDB values are converted to `serde_json::Value`.
    pub fn execute(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        let mut stmt = self.conn.prepare(sql)?;

        let param_values: Vec<&dyn duckdb::ToSql> = params
            .iter()
            .map(|p| p as &dyn duckdb::ToSql)
            .collect();

        let mut rows_result = stmt.query(param_values.as_slice())?;

        // Column metadata is only available after execution
        let stmt_ref = rows_result.as_ref().ok_or_else(|| {
            AnalyticsError::InvalidArgument("query produced no statement".to_string())
        })?;
        let column_names: Vec<String> = stmt_ref
            .column_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect();
        let column_count = stmt_ref.column_count();

        let mut out: Vec<HashMap<String, serde_json::Value>> = Vec::new();

        while let Some(row) = rows_result.next()? {
            let mut map = HashMap::with_capacity(column_count);
            for (i, col_name) in column_names.iter().enumerate().take(column_count) {
                map.insert(col_name.clone(), convert_value_ref(row.get_ref(i)?));
            }
            out.push(map);
        }

        Ok(out)
    }

    /// Execute SQL and deserialize each row into type `T`.
    pub fn execute_into<T: DeserializeOwned>(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Vec<T>> {
        let rows = self.execute(sql, params)?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let value = serde_json::Value::Object(
                row.into_iter().collect::<serde_json::Map<String, serde_json::Value>>(),
            );
            results.push(serde_json::from_value(value)?);
        }
        Ok(results)
    }

    /// Execute SQL and return the first column of the first row.
    ///
    /// Returns `None` if the result set is empty.
    pub fn execute_scalar(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Option<serde_json::Value>> {
        let mut stmt = self.conn.prepare(sql)?;
        let param_values: Vec<&dyn duckdb::ToSql> = params
            .iter()
            .map(|p| p as &dyn duckdb::ToSql)
            .collect();

        let mut rows = stmt.query(param_values.as_slice())?;

        if let Some(row) = rows.next()? {
            Ok(Some(convert_value_ref(row.get_ref(0)?)))
        } else {
            Ok(None)
        }
    }

    /// Check whether a table has been registered.
    pub fn has_table(&self, name: &str) -> bool {
        self.registered_tables.borrow().contains(name)
    }

    /// Return the registered table names, sorted.
    pub fn tables(&self) -> Vec<String> {
        let mut names: Vec<String> = self.registered_tables.borrow().iter().cloned().collect();
        names.sort();
        names
    }

    /// Access the underlying DuckDB connection for advanced usage.
    pub fn raw(&self) -> &DuckDbConnection {
        &self.conn
    }
}

/// Forward slashes and doubled quotes so a path can sit inside a SQL literal.
fn sql_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/").replace('\'', "''")
}

/// Convert a DuckDB `ValueRef` to a `serde_json::Value`.
fn convert_value_ref(val: ValueRef<'_>) -> serde_json::Value {
    match val {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Boolean(b) => serde_json::Value::Bool(b),
        ValueRef::TinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::SmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::Int(n) => serde_json::Value::Number(n.into()),
        ValueRef::BigInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::UTinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::USmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::UInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::UBigInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::HugeInt(n) => {
            // HugeInt may not fit in i64
            if let Ok(i) = i64::try_from(n) {
                serde_json::Value::Number(i.into())
            } else {
                serde_json::Value::String(n.to_string())
            }
        }
        ValueRef::Float(f) => serde_json::Number::from_f64(f as f64)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Double(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Text(bytes) => {
            serde_json::Value::String(String::from_utf8_lossy(bytes).to_string())
        }
        // Timestamps, decimals and nested types are cast in SQL before they get here
        _ => serde_json::Value::Null,
    }
}
