//! Customer satisfaction by delivery-time bucket.

use std::collections::HashMap;

use super::buckets::classify;
use crate::models::{
    Availability, BucketScore, BucketScores, DeliveryBucket, MissingData, TransactionSet,
};

/// Mean review score per delivery bucket, in bucket order.
///
/// Rows with an undefined delivery time or review score are left out.
/// Buckets without any scored row are absent rather than zero.
pub fn scores_by_delivery_bucket(set: &TransactionSet) -> Availability<BucketScores> {
    let caps = set.capabilities();
    if !caps.has_delivery_time || !caps.has_review_score {
        return Availability::Unavailable(MissingData::DeliveryOrReview);
    }

    let mut acc: HashMap<DeliveryBucket, (f64, usize)> = HashMap::new();
    for t in set {
        let bucket = classify(t.delivery_days);
        if bucket == DeliveryBucket::Unknown {
            continue;
        }
        let Some(score) = t.review_score.filter(|s| !s.is_nan()) else {
            continue;
        };
        let entry = acc.entry(bucket).or_insert((0.0, 0));
        entry.0 += score;
        entry.1 += 1;
    }

    let scores = DeliveryBucket::ORDERED
        .iter()
        .filter_map(|bucket| {
            acc.get(bucket).map(|(sum, n)| {
                let mean = sum / *n as f64;
                BucketScore {
                    bucket: *bucket,
                    mean_score: mean,
                    score_label: format!("{:.2}", mean),
                }
            })
        })
        .collect();

    Availability::Available(BucketScores { scores })
}
