//! Assemble every aggregate for one selection into a [`DashboardReport`].

use super::{category, delivery, experience, geography, kpi, trend};
use crate::models::{DashboardReport, SalesFilter, TransactionSet};

/// Build the full report for `selection`.
///
/// `previous` is the same month filter one year earlier, or `None` when that
/// year has no data. Schema gaps show up as markers in the affected fields;
/// they never prevent the rest of the report from being built.
pub fn build_report(
    selection: &SalesFilter,
    current: &TransactionSet,
    previous: Option<&TransactionSet>,
) -> DashboardReport {
    let current_label = selection.label();
    let previous_label = selection.previous_year().label();

    DashboardReport {
        selection: selection.clone(),
        has_previous: previous.is_some_and(|p| !p.is_empty()),
        kpis: kpi::compute(current, previous),
        revenue_trend: trend::revenue_trend(current, previous, &current_label, &previous_label),
        categories: category::top_categories(current),
        regions: geography::revenue_by_region(current),
        delivery_scores: delivery::scores_by_delivery_bucket(current),
        experience: experience::summarize(current, previous),
        current_label,
        previous_label,
    }
}
