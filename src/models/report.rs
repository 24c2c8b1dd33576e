use serde::{Deserialize, Serialize};

use super::availability::Availability;
use super::chart::{BucketScores, CategoryRanking, RegionRevenue, RevenueTrend};
use super::kpi::{ExperienceSummary, KpiSet};
use super::transaction::SalesFilter;

// ---------------------------------------------------------------------------
// DashboardReport - Every aggregate for one selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub selection: SalesFilter,
    pub current_label: String,
    pub previous_label: String,
    /// Whether the previous year had any data to compare against.
    pub has_previous: bool,
    pub kpis: KpiSet,
    pub revenue_trend: RevenueTrend,
    pub categories: Availability<CategoryRanking>,
    pub regions: Availability<RegionRevenue>,
    pub delivery_scores: Availability<BucketScores>,
    pub experience: ExperienceSummary,
}
