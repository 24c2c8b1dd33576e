//! Customer experience cards: average delivery time and review score.

use super::kpi::trend;
use crate::models::{
    Availability, DeliverySummary, ExperienceSummary, MissingData, ReviewSummary,
    TransactionSet,
};

/// Summarize delivery time (against `previous`) and review score for `current`.
pub fn summarize(current: &TransactionSet, previous: Option<&TransactionSet>) -> ExperienceSummary {
    ExperienceSummary {
        delivery: delivery_summary(current, previous),
        review: review_summary(current),
    }
}

pub fn delivery_summary(
    current: &TransactionSet,
    previous: Option<&TransactionSet>,
) -> Availability<DeliverySummary> {
    if !current.capabilities().has_delivery_time {
        return Availability::Unavailable(MissingData::DeliveryTime);
    }

    let average = mean_defined(current.iter().map(|t| t.delivery_days)).unwrap_or(0.0);
    let previous_average = previous
        .filter(|p| p.capabilities().has_delivery_time)
        .and_then(|p| mean_defined(p.iter().map(|t| t.delivery_days)))
        .unwrap_or(0.0);

    Availability::Available(DeliverySummary {
        average_days: average,
        previous_average_days: previous_average,
        display: format!("{:.1} days", average),
        trend: trend(average, previous_average),
    })
}

pub fn review_summary(current: &TransactionSet) -> Availability<ReviewSummary> {
    if !current.capabilities().has_review_score {
        return Availability::Unavailable(MissingData::ReviewScore);
    }

    let average = mean_defined(current.iter().map(|t| t.review_score)).unwrap_or(0.0);
    let filled = average
        .round()
        .clamp(0.0, f64::from(ReviewSummary::MAX_STARS)) as u8;

    Availability::Available(ReviewSummary {
        average_score: average,
        display: format!("{:.1}/5.0", average),
        filled_stars: filled,
    })
}

/// Mean of the defined, non-NaN values; `None` when there are none.
fn mean_defined(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, n) = values
        .flatten()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        None
    } else {
        Some(sum / n as f64)
    }
}
