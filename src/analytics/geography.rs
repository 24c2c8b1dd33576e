//! Revenue per customer region.

use crate::models::{Availability, MissingData, RegionRevenue, TransactionSet};

/// Sum revenue per `customer_state`. Every region present is returned.
pub fn revenue_by_region(set: &TransactionSet) -> Availability<RegionRevenue> {
    if !set.capabilities().has_region {
        return Availability::Unavailable(MissingData::Region);
    }

    let mut out = RegionRevenue::default();
    for t in set {
        if let Some(state) = &t.customer_state {
            *out.revenue.entry(state.clone()).or_insert(0.0) += t.price;
        }
    }
    Availability::Available(out)
}
