use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// MissingData - Which schema gap prevented an aggregate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingData {
    Category,
    Region,
    DeliveryOrReview,
    DeliveryTime,
    ReviewScore,
}

impl MissingData {
    /// Human-readable notice shown in place of the chart or card.
    pub fn message(&self) -> &'static str {
        match self {
            MissingData::Category => "Product category data not available",
            MissingData::Region => "Geographic data not available",
            MissingData::DeliveryOrReview => "Delivery or review data not available",
            MissingData::DeliveryTime => "Delivery time data not available",
            MissingData::ReviewScore => "Review score data not available",
        }
    }
}

impl fmt::Display for MissingData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

// ---------------------------------------------------------------------------
// Availability - An aggregate or the "data not available" marker
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Availability<T> {
    Available(T),
    Unavailable(MissingData),
}

impl<T> Availability<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available(_))
    }

    pub fn as_available(&self) -> Option<&T> {
        match self {
            Availability::Available(v) => Some(v),
            Availability::Unavailable(_) => None,
        }
    }

    pub fn into_available(self) -> Option<T> {
        match self {
            Availability::Available(v) => Some(v),
            Availability::Unavailable(_) => None,
        }
    }

    /// The schema gap, if this is the marker.
    pub fn missing(&self) -> Option<MissingData> {
        match self {
            Availability::Available(_) => None,
            Availability::Unavailable(m) => Some(*m),
        }
    }
}
