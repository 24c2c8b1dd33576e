//! Aggregation core.
//!
//! Every function here is a pure function of its [`TransactionSet`](crate::models::TransactionSet)
//! inputs: nothing is cached and inputs are never mutated, so calling any of
//! them twice on the same set gives identical output.

pub mod buckets;
pub mod category;
pub mod dashboard;
pub mod delivery;
pub mod experience;
pub mod format;
pub mod geography;
pub mod kpi;
pub mod ticks;
pub mod trend;

pub use buckets::classify;
pub use category::{rank_categories, top_categories};
pub use dashboard::build_report;
pub use delivery::scores_by_delivery_bucket;
pub use experience::summarize;
pub use geography::revenue_by_region;
pub use kpi::{average_order_value, monthly_growth};
pub use ticks::{nice_step, tick_scale, tick_scale_for};
pub use trend::{monthly_series, revenue_trend};
