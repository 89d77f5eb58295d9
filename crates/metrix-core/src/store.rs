//! Series stores.
//!
//! Each store maps `metric name -> series key -> entry`, backed by `DashMap`
//! so unrelated metrics never contend on the same lock. Counter and gauge
//! values are lock-free `f64` cells; histogram entries carry a per-entry
//! mutex so buckets, sum, and count always move together.

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::labels::{LabelSet, SeriesKey};

/// `f64` stored as raw bits in an `AtomicU64`, updated by CAS.
#[derive(Debug)]
pub struct AtomicF64(AtomicU64);

impl Default for AtomicF64 {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl AtomicF64 {
    pub fn new(v: f64) -> Self {
        Self(AtomicU64::new(v.to_bits()))
    }

    pub fn load(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Acquire))
    }

    pub fn store(&self, v: f64) {
        self.0.store(v.to_bits(), Ordering::Release);
    }

    /// Apply `f` atomically and return the new value.
    pub fn update(&self, f: impl Fn(f64) -> f64) -> f64 {
        let mut cur = self.0.load(Ordering::Acquire);
        loop {
            let next = f(f64::from_bits(cur));
            match self
                .0
                .compare_exchange_weak(cur, next.to_bits(), Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return next,
                Err(actual) => cur = actual,
            }
        }
    }

    pub fn add(&self, delta: f64) -> f64 {
        self.update(|v| v + delta)
    }
}

/// Point-in-time copy of one histogram series.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSnapshot {
    /// Raw (non-cumulative) per-bucket counts; last slot is `+Inf`.
    pub buckets: Vec<u64>,
    pub sum: f64,
    pub count: u64,
}

#[derive(Debug)]
pub struct HistogramCell {
    state: Mutex<HistogramSnapshot>,
}

impl HistogramCell {
    /// Cell for `bounds` configured upper bounds (plus the overflow slot).
    pub fn new(bounds: usize) -> Self {
        Self {
            state: Mutex::new(HistogramSnapshot {
                buckets: vec![0; bounds + 1],
                sum: 0.0,
                count: 0,
            }),
        }
    }

    pub fn observe(&self, index: usize, value: f64) {
        // Updates below cannot panic, so a poisoned lock still guards
        // consistent data.
        let mut s = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let last = s.buckets.len().saturating_sub(1);
        s.buckets[index.min(last)] += 1;
        s.sum += value;
        s.count += 1;
    }

    pub fn snapshot(&self) -> HistogramSnapshot {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

/// Index of the first bound `b` with `value <= b`, else the overflow slot.
pub fn bucket_index(bounds: &[f64], value: f64) -> usize {
    bounds.iter().position(|b| value <= *b).unwrap_or(bounds.len())
}

/// One series: its canonical labels plus the mutable aggregate.
#[derive(Debug)]
pub struct Series<E> {
    pub labels: LabelSet,
    pub value: E,
}

pub struct SeriesStore<E> {
    families: DashMap<String, DashMap<SeriesKey, Arc<Series<E>>>>,
}

impl<E> Default for SeriesStore<E> {
    fn default() -> Self {
        Self { families: DashMap::new() }
    }
}

impl<E> SeriesStore<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the series for `(name, labels)`, creating it with `init` on
    /// first touch. Racing creators end up sharing one entry.
    pub fn get_or_create(&self, name: &str, labels: LabelSet, init: impl FnOnce() -> E) -> Arc<Series<E>> {
        let key = labels.identity();

        if let Some(family) = self.families.get(name) {
            if let Some(series) = family.get(&key) {
                return Arc::clone(series.value());
            }
            let series = family
                .entry(key)
                .or_insert_with(|| Arc::new(Series { labels, value: init() }));
            return Arc::clone(series.value());
        }

        let family = self.families.entry(name.to_string()).or_default();
        let series = family
            .entry(key)
            .or_insert_with(|| Arc::new(Series { labels, value: init() }));
        Arc::clone(series.value())
    }

    pub fn get(&self, name: &str, labels: &LabelSet) -> Option<Arc<Series<E>>> {
        let family = self.families.get(name)?;
        let series = family.get(&labels.identity())?;
        Some(Arc::clone(series.value()))
    }

    /// All series of `name`, sorted by label set.
    pub fn snapshot(&self, name: &str) -> Vec<Arc<Series<E>>> {
        let Some(family) = self.families.get(name) else { return vec![]; };
        let mut out: Vec<Arc<Series<E>>> = family.iter().map(|r| Arc::clone(r.value())).collect();
        drop(family);
        out.sort_by(|a, b| a.labels.cmp(&b.labels));
        out
    }

    pub fn series_count(&self, name: &str) -> usize {
        self.families.get(name).map(|f| f.len()).unwrap_or(0)
    }
}
