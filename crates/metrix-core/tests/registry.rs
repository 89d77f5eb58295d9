//! Registry write-path tests: counters, gauges, histograms, catalog.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use metrix_core::store::bucket_index;
use metrix_core::{MetricKind, MetricsError, MetricsRegistry};

#[test]
fn counter_accumulates() {
    let r = MetricsRegistry::new();
    r.define("x", MetricKind::Counter, "x help", &[]).unwrap();
    r.increment_counter("x", &[], 3.0);
    r.increment_counter("x", &[], 4.0);
    assert_eq!(r.counter_value("x", &[]), Some(7.0));
}

#[test]
fn counter_label_order_is_same_series() {
    let r = MetricsRegistry::new();
    r.inc_counter("req", &[("method", "GET"), ("route", "/")]);
    r.inc_counter("req", &[("route", "/"), ("method", "GET")]);
    assert_eq!(r.counter_value("req", &[("method", "GET"), ("route", "/")]), Some(2.0));
}

#[test]
fn counter_accepts_negative_delta() {
    let r = MetricsRegistry::new();
    r.increment_counter("x", &[], 5.0);
    r.increment_counter("x", &[], -2.0);
    assert_eq!(r.counter_value("x", &[]), Some(3.0));
}

#[test]
fn gauge_set_and_adjust() {
    let r = MetricsRegistry::new();
    r.set_gauge("g", &[], 10.0);
    r.increment_gauge("g", &[], 2.5);
    assert_eq!(r.gauge_value("g", &[]), Some(12.5));
    r.set_gauge("g", &[], 1.0);
    assert_eq!(r.gauge_value("g", &[]), Some(1.0));
}

#[test]
fn gauge_decrement_floors_at_zero() {
    let r = MetricsRegistry::new();
    r.set_gauge("g", &[], 2.0);
    r.decrement_gauge("g", &[], 3.0);
    assert_eq!(r.gauge_value("g", &[]), Some(0.0));
}

#[test]
fn gauge_decrement_on_fresh_series_stays_zero() {
    let r = MetricsRegistry::new();
    r.decrement_gauge("g", &[("route", "/")], 1.0);
    assert_eq!(r.gauge_value("g", &[("route", "/")]), Some(0.0));
}

#[test]
fn gauge_increment_is_unbounded_below() {
    let r = MetricsRegistry::new();
    r.increment_gauge("g", &[], -4.0);
    assert_eq!(r.gauge_value("g", &[]), Some(-4.0));
}

#[test]
fn bucket_assignment_uses_inclusive_bounds() {
    let bounds = [0.1, 0.5, 1.0];
    assert_eq!(bucket_index(&bounds, 0.1), 0);
    assert_eq!(bucket_index(&bounds, 0.05), 0);
    assert_eq!(bucket_index(&bounds, 0.5), 1);
    assert_eq!(bucket_index(&bounds, 0.75), 2);
    assert_eq!(bucket_index(&bounds, 2.0), 3);
    assert_eq!(bucket_index(&[], 2.0), 0);
}

#[test]
fn histogram_observe_updates_one_bucket() {
    let r = MetricsRegistry::new();
    r.define("h", MetricKind::Histogram, "h", &[0.1, 0.5, 1.0]).unwrap();
    r.observe_histogram("h", &[], 0.1).unwrap();
    r.observe_histogram("h", &[], 0.5).unwrap();
    r.observe_histogram("h", &[], 2.0).unwrap();

    let snap = r.histogram_snapshot("h", &[]).unwrap();
    assert_eq!(snap.buckets, vec![1, 1, 0, 1]);
    assert_eq!(snap.count, 3);
    assert_eq!(snap.count, snap.buckets.iter().sum::<u64>());
    assert!((snap.sum - 2.6).abs() < 1e-9);
}

#[test]
fn undefined_histogram_observe_fails_without_entry() {
    let r = MetricsRegistry::new();
    let err = r.observe_histogram("never_defined", &[], 1.0).unwrap_err();
    assert!(matches!(err, MetricsError::UndefinedMetric(ref n) if n == "never_defined"));
    assert_eq!(err.client_code().as_str(), "UNDEFINED_METRIC");
    assert!(r.histogram_snapshot("never_defined", &[]).is_none());
}

#[test]
fn non_finite_observation_is_rejected_without_entry() {
    let r = MetricsRegistry::new();
    r.define("h", MetricKind::Histogram, "h", &[1.0]).unwrap();
    for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = r.observe_histogram("h", &[("k", "v")], v).unwrap_err();
        assert!(matches!(err, MetricsError::InvalidObservation { ref name, .. } if name == "h"));
        assert_eq!(err.client_code().as_str(), "INVALID_OBSERVATION");
    }
    assert!(r.histogram_snapshot("h", &[("k", "v")]).is_none());

    r.observe_histogram("h", &[("k", "v")], 0.5).unwrap();
    let snap = r.histogram_snapshot("h", &[("k", "v")]).unwrap();
    assert_eq!(snap.count, 1);
    assert_eq!(snap.sum, 0.5);
}

#[test]
fn undefined_check_precedes_value_check() {
    let r = MetricsRegistry::new();
    let err = r.observe_histogram("missing", &[], f64::NAN).unwrap_err();
    assert!(matches!(err, MetricsError::UndefinedMetric(_)));
}

#[test]
fn define_is_first_wins() {
    let r = MetricsRegistry::new();
    r.define("m", MetricKind::Counter, "first", &[]).unwrap();
    r.define("m", MetricKind::Gauge, "second", &[]).unwrap();
    let def = r.lookup("m").unwrap();
    assert_eq!(def.help, "first");
    assert_eq!(def.kind, MetricKind::Counter);
}

#[test]
fn duplicate_define_skips_bucket_validation() {
    let r = MetricsRegistry::new();
    r.define("h", MetricKind::Histogram, "h", &[1.0, 2.0]).unwrap();
    r.define("h", MetricKind::Histogram, "h", &[3.0, 1.0]).unwrap();
    assert_eq!(r.lookup("h").unwrap().buckets, vec![1.0, 2.0]);
}

#[test]
fn histogram_rejects_unsorted_or_infinite_buckets() {
    let r = MetricsRegistry::new();
    let err = r.define("h", MetricKind::Histogram, "h", &[1.0, 1.0]).unwrap_err();
    assert_eq!(err.client_code().as_str(), "INVALID_BUCKETS");
    let err = r.define("h", MetricKind::Histogram, "h", &[1.0, f64::INFINITY]).unwrap_err();
    assert!(matches!(err, MetricsError::InvalidBuckets { .. }));
    assert!(r.lookup("h").is_none());
}

#[test]
fn non_histogram_definitions_drop_buckets() {
    let r = MetricsRegistry::new();
    r.define("c", MetricKind::Counter, "c", &[2.0, 1.0]).unwrap();
    assert!(r.lookup("c").unwrap().buckets.is_empty());
}

#[test]
fn lookup_missing_is_none() {
    let r = MetricsRegistry::new();
    assert!(r.lookup("nope").is_none());
}
