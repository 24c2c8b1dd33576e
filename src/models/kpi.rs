use serde::{Deserialize, Serialize};
use std::fmt;

use super::availability::Availability;

// ---------------------------------------------------------------------------
// Direction / Trend - Period-over-period change
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Zero change counts as up.
    pub fn of(change: f64) -> Self {
        if change >= 0.0 {
            Direction::Up
        } else {
            Direction::Down
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Direction::Up => "\u{2197}",
            Direction::Down => "\u{2198}",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Trend {
    /// The previous value was zero or undefined.
    NotAvailable,
    Change {
        direction: Direction,
        /// Absolute percentage change, never negative.
        magnitude: f64,
    },
}

impl Trend {
    pub fn is_available(&self) -> bool {
        matches!(self, Trend::Change { .. })
    }

    pub fn direction(&self) -> Option<Direction> {
        match self {
            Trend::Change { direction, .. } => Some(*direction),
            Trend::NotAvailable => None,
        }
    }

    pub fn magnitude(&self) -> Option<f64> {
        match self {
            Trend::Change { magnitude, .. } => Some(*magnitude),
            Trend::NotAvailable => None,
        }
    }

    /// Magnitude with two decimals (`"10.00"`), or `"N/A"`.
    pub fn magnitude_label(&self) -> String {
        match self {
            Trend::Change { magnitude, .. } => format!("{:.2}", magnitude),
            Trend::NotAvailable => "N/A".to_string(),
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::NotAvailable => f.write_str("N/A"),
            Trend::Change { direction, magnitude } => {
                write!(f, "{} {:.2}%", direction.arrow(), magnitude)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// KpiSet - Headline metrics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub current: f64,
    pub previous: f64,
    /// Formatted current value, e.g. `"$1.2M"` or `"1,204"`.
    pub display: String,
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthMetric {
    /// Mean month-over-month change, in percent.
    pub rate: f64,
    pub direction: Direction,
    /// Rate with two decimals and a percent sign, e.g. `"-3.25%"`.
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSet {
    pub total_revenue: Metric,
    pub monthly_growth: GrowthMetric,
    pub avg_order_value: Metric,
    pub total_orders: Metric,
}

// ---------------------------------------------------------------------------
// ExperienceSummary - Delivery and review cards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliverySummary {
    pub average_days: f64,
    pub previous_average_days: f64,
    /// e.g. `"8.3 days"`.
    pub display: String,
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub average_score: f64,
    /// e.g. `"4.1/5.0"`.
    pub display: String,
    /// Rounded average, 0 to 5.
    pub filled_stars: u8,
}

impl ReviewSummary {
    pub const MAX_STARS: u8 = 5;

    pub fn empty_stars(&self) -> u8 {
        Self::MAX_STARS - self.filled_stars
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceSummary {
    pub delivery: Availability<DeliverySummary>,
    pub review: Availability<ReviewSummary>,
}
