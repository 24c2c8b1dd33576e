//! Top product categories by revenue.

use std::collections::HashMap;

use super::{format, ticks};
use crate::config;
use crate::models::{
    Availability, CategoryRanking, CategoryRevenue, MissingData, TransactionSet,
};

/// The ten highest-revenue categories, highest first.
pub fn top_categories(set: &TransactionSet) -> Availability<CategoryRanking> {
    rank_categories(set, config::TOP_CATEGORIES)
}

/// The `limit` highest-revenue categories, highest first.
///
/// Categories with equal revenue keep the order in which they first appear in
/// the set. Rows with no category are skipped. The attached tick scale leaves
/// 25% headroom above the top entry.
pub fn rank_categories(set: &TransactionSet, limit: usize) -> Availability<CategoryRanking> {
    if !set.capabilities().has_category {
        return Availability::Unavailable(MissingData::Category);
    }

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(&str, f64)> = Vec::new();
    for t in set {
        let Some(category) = t.product_category_name.as_deref() else {
            continue;
        };
        match index.get(category) {
            Some(&i) => totals[i].1 += t.price,
            None => {
                index.insert(category, totals.len());
                totals.push((category, t.price));
            }
        }
    }

    // sort_by is stable, so ties stay in first-seen order
    totals.sort_by(|a, b| b.1.total_cmp(&a.1));
    totals.truncate(limit);

    let entries: Vec<CategoryRevenue> = totals
        .into_iter()
        .map(|(category, revenue)| CategoryRevenue {
            category: category.to_string(),
            revenue,
            revenue_label: format::currency_short(revenue),
        })
        .collect();

    let values: Vec<f64> = entries.iter().map(|e| e.revenue).collect();

    Availability::Available(CategoryRanking {
        ticks: ticks::tick_scale_for(&values, config::CATEGORY_HEADROOM),
        entries,
    })
}
