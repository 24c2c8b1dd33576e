pub mod availability;
pub mod chart;
pub mod kpi;
pub mod report;
pub mod transaction;

pub use availability::*;
pub use chart::*;
pub use kpi::*;
pub use report::*;
pub use transaction::*;
