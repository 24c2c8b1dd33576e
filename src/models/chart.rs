use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ---------------------------------------------------------------------------
// TickScale - Round-number axis positions and labels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickScale {
    pub step: f64,
    pub ticks: Vec<Tick>,
}

impl TickScale {
    pub fn values(&self) -> Vec<f64> {
        self.ticks.iter().map(|t| t.value).collect()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.ticks.iter().map(|t| t.label.as_str()).collect()
    }

    /// Largest tick value, i.e. the top of the axis.
    pub fn upper_bound(&self) -> f64 {
        self.ticks.last().map(|t| t.value).unwrap_or(0.0)
    }
}

// ---------------------------------------------------------------------------
// Revenue trend
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    pub month: u32,
    pub revenue: f64,
}

/// Revenue per present month for one period, ascending by month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySeries {
    pub label: String,
    pub points: Vec<MonthlyPoint>,
}

impl MonthlySeries {
    pub fn months(&self) -> Vec<u32> {
        self.points.iter().map(|p| p.month).collect()
    }

    pub fn revenue_for(&self, month: u32) -> Option<f64> {
        self.points.iter().find(|p| p.month == month).map(|p| p.revenue)
    }
}

/// One bar of the single-period comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonPoint {
    pub label: String,
    pub revenue: f64,
    pub revenue_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TrendMode {
    /// Month-by-month lines; the previous period is overlaid when it has data.
    Series {
        current: MonthlySeries,
        previous: Option<MonthlySeries>,
    },
    /// Current total against previous total.
    Comparison { current: ComparisonPoint, previous: ComparisonPoint },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueTrend {
    pub mode: TrendMode,
    pub ticks: Option<TickScale>,
}

impl RevenueTrend {
    pub fn is_series(&self) -> bool {
        matches!(self.mode, TrendMode::Series { .. })
    }

    /// Number of plotted points in the current period (series) or bars (comparison).
    pub fn point_count(&self) -> usize {
        match &self.mode {
            TrendMode::Series { current, .. } => current.points.len(),
            TrendMode::Comparison { .. } => 2,
        }
    }
}

// ---------------------------------------------------------------------------
// Category ranking
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRevenue {
    pub category: String,
    pub revenue: f64,
    pub revenue_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRanking {
    /// Highest revenue first.
    pub entries: Vec<CategoryRevenue>,
    pub ticks: Option<TickScale>,
}

impl CategoryRanking {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries lowest first, the order a horizontal bar chart draws bottom-up.
    pub fn ascending(&self) -> impl Iterator<Item = &CategoryRevenue> {
        self.entries.iter().rev()
    }

    pub fn categories(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.category.as_str()).collect()
    }
}

// ---------------------------------------------------------------------------
// Region revenue
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionRevenue {
    pub revenue: HashMap<String, f64>,
}

impl RegionRevenue {
    pub fn get(&self, region: &str) -> Option<f64> {
        self.revenue.get(region).copied()
    }

    pub fn len(&self) -> usize {
        self.revenue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revenue.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Delivery buckets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DeliveryBucket {
    #[serde(rename = "1-3 days")]
    OneToThreeDays,
    #[serde(rename = "4-7 days")]
    FourToSevenDays,
    #[serde(rename = "8+ days")]
    EightPlusDays,
    Unknown,
}

impl DeliveryBucket {
    /// The reportable buckets in display order.
    pub const ORDERED: [DeliveryBucket; 3] = [
        DeliveryBucket::OneToThreeDays,
        DeliveryBucket::FourToSevenDays,
        DeliveryBucket::EightPlusDays,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DeliveryBucket::OneToThreeDays => "1-3 days",
            DeliveryBucket::FourToSevenDays => "4-7 days",
            DeliveryBucket::EightPlusDays => "8+ days",
            DeliveryBucket::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for DeliveryBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketScore {
    pub bucket: DeliveryBucket,
    pub mean_score: f64,
    /// Mean score with two decimals, e.g. `"4.21"`.
    pub score_label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BucketScores {
    pub scores: Vec<BucketScore>,
}

impl BucketScores {
    pub fn get(&self, bucket: DeliveryBucket) -> Option<f64> {
        self.scores.iter().find(|s| s.bucket == bucket).map(|s| s.mean_score)
    }

    pub fn buckets(&self) -> Vec<DeliveryBucket> {
        self.scores.iter().map(|s| s.bucket).collect()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
