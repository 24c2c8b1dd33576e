//! Delivery-time bucketing.

use crate::models::DeliveryBucket;

/// Map a delivery time in days to its bucket.
///
/// Undefined (or NaN) values land in [`DeliveryBucket::Unknown`]; the upper
/// bounds 3 and 7 are inclusive.
pub fn classify(delivery_days: Option<f64>) -> DeliveryBucket {
    match delivery_days {
        Some(days) if !days.is_nan() => {
            if days <= 3.0 {
                DeliveryBucket::OneToThreeDays
            } else if days <= 7.0 {
                DeliveryBucket::FourToSevenDays
            } else {
                DeliveryBucket::EightPlusDays
            }
        }
        _ => DeliveryBucket::Unknown,
    }
}
