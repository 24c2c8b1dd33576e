//! Headline KPIs and period-over-period trends.

use super::format;
use super::trend::monthly_series;
use crate::models::{Direction, GrowthMetric, KpiSet, Metric, TransactionSet, Trend};

/// Percentage change from `previous` to `current`.
///
/// A zero or non-finite previous value has no meaningful baseline and yields
/// [`Trend::NotAvailable`].
pub fn trend(current: f64, previous: f64) -> Trend {
    if previous == 0.0 || !previous.is_finite() || !current.is_finite() {
        return Trend::NotAvailable;
    }
    let change_pct = (current - previous) / previous * 100.0;
    Trend::Change {
        direction: Direction::of(change_pct),
        magnitude: change_pct.abs(),
    }
}

/// Mean over distinct orders of each order's summed line-item price.
///
/// An empty set has an average of zero.
pub fn average_order_value(set: &TransactionSet) -> f64 {
    let totals = set.order_totals();
    if totals.is_empty() {
        return 0.0;
    }
    totals.iter().map(|(_, total)| total).sum::<f64>() / totals.len() as f64
}

/// Mean month-over-month revenue change across consecutive present months,
/// in percent.
///
/// Zero when fewer than two months are present. Pairs whose earlier month
/// had zero revenue have no defined change and are left out of the mean.
pub fn monthly_growth(set: &TransactionSet) -> f64 {
    let series = monthly_series(set, "");
    if series.points.len() <= 1 {
        return 0.0;
    }

    let changes: Vec<f64> = series
        .points
        .windows(2)
        .filter(|pair| pair[0].revenue != 0.0)
        .map(|pair| (pair[1].revenue - pair[0].revenue) / pair[0].revenue)
        .collect();

    if changes.is_empty() {
        return 0.0;
    }
    changes.iter().sum::<f64>() / changes.len() as f64 * 100.0
}

/// Compute the KPI cards for `current` against `previous`.
///
/// Without a previous period every previous value is zero, so each trend is
/// [`Trend::NotAvailable`].
pub fn compute(current: &TransactionSet, previous: Option<&TransactionSet>) -> KpiSet {
    let revenue = current.total_revenue();
    let orders = current.distinct_orders();
    let aov = average_order_value(current);

    let prev_revenue = previous.map(|p| p.total_revenue()).unwrap_or(0.0);
    let prev_orders = previous.map(|p| p.distinct_orders()).unwrap_or(0);
    let prev_aov = previous.map(average_order_value).unwrap_or(0.0);

    let growth = monthly_growth(current);

    KpiSet {
        total_revenue: Metric {
            current: revenue,
            previous: prev_revenue,
            display: format::currency_short(revenue),
            trend: trend(revenue, prev_revenue),
        },
        monthly_growth: GrowthMetric {
            rate: growth,
            direction: Direction::of(growth),
            display: format!("{:.2}%", growth),
        },
        avg_order_value: Metric {
            current: aov,
            previous: prev_aov,
            display: format::currency_short(aov),
            trend: trend(aov, prev_aov),
        },
        total_orders: Metric {
            current: orders as f64,
            previous: prev_orders as f64,
            display: format::count(orders),
            trend: trend(orders as f64, prev_orders as f64),
        },
    }
}
