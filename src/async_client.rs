//! Async wrapper around [`EcommerceAnalytics`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//! Dataset loading and DuckDB queries are blocking, so they never run on the
//! event loop itself.
//!
//! # Example
//!
//! ```no_run
//! use ecommerce_analytics::AsyncEcommerceAnalytics;
//!
//! #[tokio::main]
//! async fn main() {
//!     let analytics = AsyncEcommerceAnalytics::builder()
//!         .data_dir("ecommerce_data")
//!         .build()
//!         .await
//!         .unwrap();
//!
//!     let report = analytics.dashboard(2023, Some(6)).await.unwrap();
//!     println!("{}", report.kpis.total_revenue.display);
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::config;
use crate::error::{AnalyticsError, Result};
use crate::models::DashboardReport;
use crate::EcommerceAnalytics;

// ---------------------------------------------------------------------------
// AsyncEcommerceAnalyticsBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncEcommerceAnalytics`] instance.
pub struct AsyncEcommerceAnalyticsBuilder {
    data_dir: Option<PathBuf>,
    status: String,
}

impl Default for AsyncEcommerceAnalyticsBuilder {
    fn default() -> Self {
        Self {
            data_dir: None,
            status: config::DEFAULT_STATUS.to_string(),
        }
    }
}

impl AsyncEcommerceAnalyticsBuilder {
    /// Set the directory holding the CSV exports.
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the order status reported on.
    pub fn status(mut self, status: &str) -> Self {
        self.status = status.to_string();
        self
    }

    /// Build the async SDK, loading the dataset on the blocking thread pool.
    pub async fn build(self) -> Result<AsyncEcommerceAnalytics> {
        tokio::task::spawn_blocking(move || {
            let mut builder = EcommerceAnalytics::builder().status(&self.status);
            if let Some(dir) = self.data_dir {
                builder = builder.data_dir(dir);
            }
            let analytics = builder.build()?;
            Ok(AsyncEcommerceAnalytics {
                inner: Arc::new(Mutex::new(analytics)),
            })
        })
        .await
        .map_err(|e| AnalyticsError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncEcommerceAnalytics
// ---------------------------------------------------------------------------

/// Async wrapper around [`EcommerceAnalytics`].
///
/// The wrapped instance sits behind a [`Mutex`], so concurrent calls are
/// serialized; each one runs on the blocking pool.
#[derive(Clone)]
pub struct AsyncEcommerceAnalytics {
    inner: Arc<Mutex<EcommerceAnalytics>>,
}

impl AsyncEcommerceAnalytics {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncEcommerceAnalyticsBuilder {
        AsyncEcommerceAnalyticsBuilder::default()
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use ecommerce_analytics::AsyncEcommerceAnalytics;
    /// # async fn example() -> ecommerce_analytics::Result<()> {
    /// # let analytics = AsyncEcommerceAnalytics::builder().build().await?;
    /// let caps = analytics.run(|a| a.capabilities()).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut EcommerceAnalytics) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let inner = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = inner
                .lock()
                .map_err(|_| AnalyticsError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&mut *guard)
        })
        .await
        .map_err(|e| AnalyticsError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Build the dashboard report for `year` / `month` asynchronously.
    pub async fn dashboard(&self, year: i32, month: Option<u32>) -> Result<DashboardReport> {
        self.run(move |a| a.dashboard(year, month)).await
    }

    /// Purchase years present in the dataset, newest first.
    pub async fn available_years(&self) -> Result<Vec<i32>> {
        self.run(|a| a.available_years()).await
    }

    /// Reload the dataset if any data file changed.
    pub async fn refresh(&self) -> Result<bool> {
        self.run(|a| a.refresh()).await
    }
}
