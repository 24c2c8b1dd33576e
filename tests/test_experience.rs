mod common;

use common::{assert_close, set, set_with, tx};
use ecommerce_analytics::analytics::{scores_by_delivery_bucket, summarize};
use ecommerce_analytics::models::{
    Availability, Capabilities, DeliveryBucket, Direction, MissingData, Trend,
};
use ecommerce_analytics::Transaction;

fn delivered(order: &str, days: f64, score: f64) -> Transaction {
    tx(order, 10.0, 1)
        .with_delivery_days(days)
        .with_review_score(score)
}

// ---------------------------------------------------------------------------
// scores_by_delivery_bucket
// ---------------------------------------------------------------------------

#[test]
fn mean_score_per_bucket_in_order() {
    let s = set(vec![
        delivered("A", 12.0, 2.0),
        delivered("B", 2.0, 5.0),
        delivered("C", 1.0, 4.0),
        delivered("D", 5.0, 3.0),
        delivered("E", 30.0, 3.0),
    ]);
    let scores = scores_by_delivery_bucket(&s).into_available().unwrap();

    assert_eq!(
        scores.buckets(),
        vec![
            DeliveryBucket::OneToThreeDays,
            DeliveryBucket::FourToSevenDays,
            DeliveryBucket::EightPlusDays,
        ]
    );
    assert_close(scores.get(DeliveryBucket::OneToThreeDays).unwrap(), 4.5);
    assert_close(scores.get(DeliveryBucket::FourToSevenDays).unwrap(), 3.0);
    assert_close(scores.get(DeliveryBucket::EightPlusDays).unwrap(), 2.5);
    assert_eq!(scores.scores[0].score_label, "4.50");
}

#[test]
fn undefined_delivery_time_is_excluded() {
    let s = set(vec![
        delivered("A", 2.0, 4.0),
        tx("B", 10.0, 1).with_review_score(1.0),
    ]);
    let scores = scores_by_delivery_bucket(&s).into_available().unwrap();

    assert_eq!(scores.len(), 1);
    assert_close(scores.get(DeliveryBucket::OneToThreeDays).unwrap(), 4.0);
    assert_eq!(scores.get(DeliveryBucket::Unknown), None);
}

#[test]
fn unscored_rows_are_excluded_and_empty_buckets_absent() {
    let s = set(vec![
        delivered("A", 2.0, 4.0),
        tx("B", 10.0, 1).with_delivery_days(10.0),
    ]);
    let scores = scores_by_delivery_bucket(&s).into_available().unwrap();
    assert_eq!(scores.buckets(), vec![DeliveryBucket::OneToThreeDays]);
}

#[test]
fn bucket_scores_need_both_capabilities() {
    for caps in [
        Capabilities {
            has_delivery_time: false,
            ..Capabilities::all()
        },
        Capabilities {
            has_review_score: false,
            ..Capabilities::all()
        },
    ] {
        let s = set_with(vec![delivered("A", 2.0, 4.0)], caps);
        assert_eq!(
            scores_by_delivery_bucket(&s),
            Availability::Unavailable(MissingData::DeliveryOrReview)
        );
    }
}

// ---------------------------------------------------------------------------
// summarize
// ---------------------------------------------------------------------------

#[test]
fn delivery_summary_against_previous() {
    let current = set(vec![delivered("A", 4.0, 5.0), delivered("B", 6.0, 4.0)]);
    let previous = set(vec![delivered("C", 4.0, 5.0)]);
    let summary = summarize(&current, Some(&previous));

    let delivery = summary.delivery.into_available().unwrap();
    assert_close(delivery.average_days, 5.0);
    assert_close(delivery.previous_average_days, 4.0);
    assert_eq!(delivery.display, "5.0 days");
    // Longer delivery is still reported as Up
    assert_eq!(delivery.trend.direction(), Some(Direction::Up));
    assert_eq!(delivery.trend.magnitude_label(), "25.00");
}

#[test]
fn delivery_summary_without_previous_has_no_trend() {
    let current = set(vec![delivered("A", 3.0, 5.0)]);
    let delivery = summarize(&current, None).delivery.into_available().unwrap();
    assert_eq!(delivery.previous_average_days, 0.0);
    assert_eq!(delivery.trend, Trend::NotAvailable);
}

#[test]
fn delivery_summary_ignores_undefined_days() {
    let current = set(vec![delivered("A", 3.0, 5.0), tx("B", 1.0, 1)]);
    let delivery = summarize(&current, None).delivery.into_available().unwrap();
    assert_close(delivery.average_days, 3.0);
}

#[test]
fn review_summary_stars() {
    let current = set(vec![
        delivered("A", 1.0, 5.0),
        delivered("B", 1.0, 4.0),
        delivered("C", 1.0, 3.0),
        delivered("D", 1.0, 4.0),
    ]);
    let review = summarize(&current, None).review.into_available().unwrap();

    assert_close(review.average_score, 4.0);
    assert_eq!(review.display, "4.0/5.0");
    assert_eq!(review.filled_stars, 4);
    assert_eq!(review.empty_stars(), 1);
}

#[test]
fn empty_set_summaries_are_zero() {
    let summary = summarize(&set(vec![]), None);
    let delivery = summary.delivery.into_available().unwrap();
    let review = summary.review.into_available().unwrap();
    assert_eq!(delivery.average_days, 0.0);
    assert_eq!(review.average_score, 0.0);
    assert_eq!(review.filled_stars, 0);
}

#[test]
fn summaries_report_missing_columns_separately() {
    let caps = Capabilities {
        has_review_score: false,
        ..Capabilities::all()
    };
    let summary = summarize(&set_with(vec![delivered("A", 2.0, 4.0)], caps), None);
    assert!(summary.delivery.is_available());
    assert_eq!(summary.review.missing(), Some(MissingData::ReviewScore));

    let caps = Capabilities {
        has_delivery_time: false,
        ..Capabilities::all()
    };
    let summary = summarize(&set_with(vec![delivered("A", 2.0, 4.0)], caps), None);
    assert_eq!(summary.delivery.missing(), Some(MissingData::DeliveryTime));
    assert!(summary.review.is_available());
}
