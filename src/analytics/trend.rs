//! Revenue-over-time chart data.
//!
//! A period with several months becomes a month-by-month series (optionally
//! overlaid with the previous period). A period with a single month, or no
//! rows at all, collapses to a two-bar comparison of period totals.

use super::{format, ticks};
use crate::config;
use crate::models::{
    ComparisonPoint, MonthlyPoint, MonthlySeries, RevenueTrend, TransactionSet, TrendMode,
};

/// Revenue per present month, ascending by month number.
pub fn monthly_series(set: &TransactionSet, label: &str) -> MonthlySeries {
    MonthlySeries {
        label: label.to_string(),
        points: set
            .monthly_revenue()
            .into_iter()
            .map(|(month, revenue)| MonthlyPoint { month, revenue })
            .collect(),
    }
}

/// Build the revenue trend for `current`, compared against `previous`.
///
/// Series are aligned by month number only; the two periods may cover
/// different months. The shared tick scale leaves 15% headroom above the
/// largest plotted value.
pub fn revenue_trend(
    current: &TransactionSet,
    previous: Option<&TransactionSet>,
    current_label: &str,
    previous_label: &str,
) -> RevenueTrend {
    let previous = previous.filter(|p| !p.is_empty());

    if current.months().len() > 1 {
        let current_series = monthly_series(current, current_label);
        let previous_series = previous.map(|p| monthly_series(p, previous_label));

        let values: Vec<f64> = current_series
            .points
            .iter()
            .chain(previous_series.iter().flat_map(|s| s.points.iter()))
            .map(|p| p.revenue)
            .collect();

        return RevenueTrend {
            ticks: ticks::tick_scale_for(&values, config::TREND_HEADROOM),
            mode: TrendMode::Series {
                current: current_series,
                previous: previous_series,
            },
        };
    }

    let current_total = current.total_revenue();
    let previous_total = previous.map(|p| p.total_revenue()).unwrap_or(0.0);

    let mut values = Vec::with_capacity(2);
    if !current.is_empty() {
        values.push(current_total);
    }
    if previous.is_some() {
        values.push(previous_total);
    }

    RevenueTrend {
        ticks: ticks::tick_scale_for(&values, config::TREND_HEADROOM),
        mode: TrendMode::Comparison {
            current: comparison_point(current_label, current_total),
            previous: comparison_point(previous_label, previous_total),
        },
    }
}

fn comparison_point(label: &str, revenue: f64) -> ComparisonPoint {
    ComparisonPoint {
        label: label.to_string(),
        revenue,
        revenue_label: format::currency_short(revenue),
    }
}
