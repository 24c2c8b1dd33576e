//! E-commerce analytics SDK for Rust.
//!
//! Loads order, line-item, product, customer and review exports (CSV) into
//! an in-process DuckDB database and derives chart-ready aggregates from
//! them: KPI cards with year-over-year trends, revenue-over-time series,
//! top-category rankings, revenue per region, and review scores by delivery
//! time.
//!
//! # Quick start
//!
//! ```no_run
//! use ecommerce_analytics::EcommerceAnalytics;
//!
//! let mut analytics = EcommerceAnalytics::builder()
//!     .data_dir("ecommerce_data")
//!     .build()
//!     .unwrap();
//!
//! let year = analytics.default_year().unwrap().unwrap();
//! let report = analytics.dashboard(year, None).unwrap();
//! println!("{} revenue: {}", report.current_label, report.kpis.total_revenue.display);
//! ```
//!
//! The aggregation functions in [`analytics`] are pure and can also be used
//! directly on a [`TransactionSet`] built by other means.

pub mod analytics;
#[cfg(feature = "async")]
pub mod async_client;
pub mod cache;
pub mod config;
pub mod connection;
pub mod error;
pub mod models;
pub mod provider;
pub mod sql_builder;

#[cfg(feature = "async")]
pub use async_client::AsyncEcommerceAnalytics;
pub use cache::{DatasetCache, DatasetKey, LoadedDataset};
pub use connection::Connection;
pub use error::{AnalyticsError, Result};
pub use models::{Capabilities, DashboardReport, SalesFilter, Transaction, TransactionSet};
pub use provider::DataProvider;
pub use sql_builder::SqlBuilder;

use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

// ---------------------------------------------------------------------------
// EcommerceAnalyticsBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`EcommerceAnalytics`] instance.
///
/// Use [`EcommerceAnalytics::builder()`] to obtain a builder, chain
/// configuration methods, and call [`build()`](EcommerceAnalyticsBuilder::build).
pub struct EcommerceAnalyticsBuilder {
    data_dir: Option<PathBuf>,
    status: String,
}

impl Default for EcommerceAnalyticsBuilder {
    fn default() -> Self {
        Self {
            data_dir: None,
            status: config::DEFAULT_STATUS.to_string(),
        }
    }
}

impl EcommerceAnalyticsBuilder {
    /// Set the directory holding the CSV exports.
    ///
    /// Defaults to `ecommerce_data` relative to the working directory.
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the order status reported on. Defaults to `"delivered"`.
    pub fn status(mut self, status: &str) -> Self {
        self.status = status.to_string();
        self
    }

    /// Build the SDK and load the dataset.
    ///
    /// Loading eagerly means a missing directory or required file is
    /// reported here, before any report is requested.
    pub fn build(self) -> Result<EcommerceAnalytics> {
        let mut analytics = EcommerceAnalytics {
            data_dir: self.data_dir.unwrap_or_else(config::default_data_dir),
            status: self.status,
            cache: DatasetCache::new(),
        };
        analytics.cache.load(&analytics.data_dir)?;
        Ok(analytics)
    }
}

// ---------------------------------------------------------------------------
// EcommerceAnalytics
// ---------------------------------------------------------------------------

/// The main entry point: a cached dataset plus the report operations on it.
///
/// Every operation revalidates the cache first, so edits to the data files
/// are picked up on the next call.
pub struct EcommerceAnalytics {
    data_dir: PathBuf,
    status: String,
    cache: DatasetCache,
}

impl EcommerceAnalytics {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> EcommerceAnalyticsBuilder {
        EcommerceAnalyticsBuilder::default()
    }

    /// The loaded dataset, reloading it first if the data files changed.
    pub fn dataset(&mut self) -> Result<&LoadedDataset> {
        self.cache.load(&self.data_dir)
    }

    /// Access the data provider for the current dataset.
    pub fn provider(&mut self) -> Result<DataProvider<'_>> {
        Ok(self.dataset()?.provider())
    }

    /// Optional attributes present in the dataset.
    pub fn capabilities(&mut self) -> Result<Capabilities> {
        Ok(self.dataset()?.capabilities())
    }

    /// Purchase years present in the dataset (any status), newest first.
    pub fn available_years(&mut self) -> Result<Vec<i32>> {
        self.provider()?.available_years(None)
    }

    /// The year a dashboard should open on, if the dataset has any orders.
    pub fn default_year(&mut self) -> Result<Option<i32>> {
        self.provider()?.default_year()
    }

    /// Transactions for `year` (and `month`, if given) in the configured status.
    pub fn sales_dataset(&mut self, year: i32, month: Option<u32>) -> Result<TransactionSet> {
        let filter = SalesFilter::new(year, month, &self.status);
        self.provider()?.sales_dataset(&filter)
    }

    /// Build every dashboard aggregate for `year` / `month`.
    ///
    /// The previous period is the same month filter one year earlier, and is
    /// only loaded when that year appears in the dataset.
    pub fn dashboard(&mut self, year: i32, month: Option<u32>) -> Result<DashboardReport> {
        let filter = SalesFilter::new(year, month, &self.status);
        filter.validate()?;

        let provider = self.provider()?;
        let years = provider.available_years(None)?;
        let current = provider.sales_dataset(&filter)?;

        let previous_filter = filter.previous_year();
        let previous = if years.contains(&previous_filter.year) {
            Some(provider.sales_dataset(&previous_filter)?)
        } else {
            None
        };

        info!(
            year,
            month = ?month,
            rows = current.len(),
            previous_rows = previous.as_ref().map(|p| p.len()),
            "building dashboard report"
        );

        Ok(analytics::build_report(&filter, &current, previous.as_ref()))
    }

    /// Reload the dataset if any data file changed since it was loaded.
    ///
    /// Returns `true` if a reload happened.
    pub fn refresh(&mut self) -> Result<bool> {
        let stale = self.cache.is_stale(&self.data_dir)?;
        if stale {
            self.cache.clear();
            self.cache.load(&self.data_dir)?;
            info!(dir = %self.data_dir.display(), "data files changed; dataset reloaded");
        }
        Ok(stale)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Return a reference to the underlying [`DatasetCache`].
    pub fn cache(&self) -> &DatasetCache {
        &self.cache
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for EcommerceAnalytics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tables = self
            .cache
            .current()
            .map(|d| d.connection().tables())
            .unwrap_or_default();
        write!(
            f,
            "EcommerceAnalytics(data_dir={}, status={}, tables=[{}])",
            self.data_dir.display(),
            self.status,
            tables.join(", ")
        )
    }
}
