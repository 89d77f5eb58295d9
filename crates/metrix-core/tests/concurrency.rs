//! Concurrent write-path tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::thread;

use metrix_core::{MetricKind, MetricsRegistry};

const THREADS: usize = 8;
const PER_THREAD: usize = 1_000;

#[test]
fn concurrent_counter_increments_are_not_lost() {
    let r = Arc::new(MetricsRegistry::new());
    r.define("hits", MetricKind::Counter, "hits", &[]).unwrap();

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let r = Arc::clone(&r);
            thread::spawn(move || {
                for _ in 0..PER_THREAD {
                    r.inc_counter("hits", &[("route", "/")]);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let expected = (THREADS * PER_THREAD) as f64;
    assert_eq!(r.counter_value("hits", &[("route", "/")]), Some(expected));
    assert!(r.render().unwrap().contains(&format!("hits{{route=\"/\"}} {}\n", expected)));
}

#[test]
fn concurrent_histogram_observations_stay_consistent() {
    let r = Arc::new(MetricsRegistry::new());
    r.define("lat", MetricKind::Histogram, "lat", &[1.0, 2.0]).unwrap();

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let r = Arc::clone(&r);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    r.observe_histogram("lat", &[], ((t + i) % 4) as f64).unwrap();
                    if i % 100 == 0 {
                        r.render().unwrap();
                    }
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let snap = r.histogram_snapshot("lat", &[]).unwrap();
    assert_eq!(snap.buckets.len(), 3);
    assert_eq!(snap.count, (THREADS * PER_THREAD) as u64);
    assert_eq!(snap.count, snap.buckets.iter().sum::<u64>());
}

#[test]
fn concurrent_first_touch_creates_one_series() {
    let r = Arc::new(MetricsRegistry::new());
    r.define("g", MetricKind::Gauge, "g", &[]).unwrap();

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let r = Arc::clone(&r);
            thread::spawn(move || r.increment_gauge("g", &[("shard", "x")], 1.0))
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(r.gauge_value("g", &[("shard", "x")]), Some(THREADS as f64));
    let lines = r.render().unwrap().lines().filter(|l| l.starts_with("g{")).count();
    assert_eq!(lines, 1);
}

#[test]
fn concurrent_defines_keep_every_name() {
    let r = Arc::new(MetricsRegistry::new());
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let r = Arc::clone(&r);
            thread::spawn(move || {
                for i in 0..50 {
                    let name = format!("m_{t}_{i}");
                    r.define(&name, MetricKind::Counter, "m", &[]).unwrap();
                    r.define("shared", MetricKind::Gauge, "shared", &[]).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let out = r.render().unwrap();
    assert_eq!(out.matches("# TYPE ").count(), THREADS * 50 + 1);
    assert_eq!(out.matches("# HELP shared ").count(), 1);
}
