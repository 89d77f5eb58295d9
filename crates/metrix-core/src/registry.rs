//! The metrics registry: catalog plus the three series stores.
//!
//! A registry is an ordinary value. Build one at startup, wrap it in an
//! `Arc`, and hand it to every component that records or renders.

use crate::catalog::{Catalog, MetricDef, MetricKind};
use crate::error::{MetricsError, Result};
use crate::labels::LabelSet;
use crate::render;
use crate::store::{bucket_index, AtomicF64, HistogramCell, HistogramSnapshot, SeriesStore};

use std::sync::Arc;

#[derive(Default)]
pub struct MetricsRegistry {
    pub(crate) catalog: Catalog,
    pub(crate) counters: SeriesStore<AtomicF64>,
    pub(crate) gauges: SeriesStore<AtomicF64>,
    pub(crate) histograms: SeriesStore<HistogramCell>,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a metric family. Idempotent: the first definition of a name
    /// wins, even if a later call passes a different kind or help text.
    /// `buckets` is only read for histograms.
    pub fn define(&self, name: &str, kind: MetricKind, help: &str, buckets: &[f64]) -> Result<()> {
        if self.catalog.define(name, kind, help, buckets)? {
            tracing::debug!(metric = %name, kind = kind.as_str(), "metric defined");
        } else {
            tracing::trace!(metric = %name, "duplicate define ignored");
        }
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<MetricDef>> {
        self.catalog.lookup(name)
    }

    /// Increment by 1.
    pub fn inc_counter(&self, name: &str, labels: &[(&str, &str)]) {
        self.increment_counter(name, labels, 1.0);
    }

    /// Add `delta` to a counter series, creating it on first touch. The
    /// sign of `delta` is not checked.
    pub fn increment_counter(&self, name: &str, labels: &[(&str, &str)], delta: f64) {
        let series = self.counters.get_or_create(name, LabelSet::from_pairs(labels), AtomicF64::default);
        series.value.add(delta);
    }

    pub fn set_gauge(&self, name: &str, labels: &[(&str, &str)], value: f64) {
        let series = self.gauges.get_or_create(name, LabelSet::from_pairs(labels), AtomicF64::default);
        series.value.store(value);
    }

    pub fn increment_gauge(&self, name: &str, labels: &[(&str, &str)], delta: f64) {
        let series = self.gauges.get_or_create(name, LabelSet::from_pairs(labels), AtomicF64::default);
        series.value.add(delta);
    }

    /// Subtract `delta`, flooring the result at zero.
    pub fn decrement_gauge(&self, name: &str, labels: &[(&str, &str)], delta: f64) {
        let series = self.gauges.get_or_create(name, LabelSet::from_pairs(labels), AtomicF64::default);
        series.value.update(|v| (v - delta).max(0.0));
    }

    /// Record one observation. Fails with `UndefinedMetric` unless `name`
    /// was defined first, and with `InvalidObservation` for NaN or infinite
    /// values, which would otherwise pin `sum` forever. Neither failure
    /// creates a series.
    pub fn observe_histogram(&self, name: &str, labels: &[(&str, &str)], value: f64) -> Result<()> {
        let def = self
            .catalog
            .lookup(name)
            .ok_or_else(|| MetricsError::UndefinedMetric(name.to_string()))?;
        if !value.is_finite() {
            return Err(MetricsError::InvalidObservation {
                name: name.to_string(),
                value,
            });
        }

        let bounds = def.buckets.len();
        let series = self
            .histograms
            .get_or_create(name, LabelSet::from_pairs(labels), || HistogramCell::new(bounds));
        series.value.observe(bucket_index(&def.buckets, value), value);
        Ok(())
    }

    /// Current value of a counter series, if it exists.
    pub fn counter_value(&self, name: &str, labels: &[(&str, &str)]) -> Option<f64> {
        self.counters
            .get(name, &LabelSet::from_pairs(labels))
            .map(|s| s.value.load())
    }

    /// Current value of a gauge series, if it exists.
    pub fn gauge_value(&self, name: &str, labels: &[(&str, &str)]) -> Option<f64> {
        self.gauges
            .get(name, &LabelSet::from_pairs(labels))
            .map(|s| s.value.load())
    }

    /// Consistent copy of one histogram series, if it exists.
    pub fn histogram_snapshot(&self, name: &str, labels: &[(&str, &str)]) -> Option<HistogramSnapshot> {
        self.histograms
            .get(name, &LabelSet::from_pairs(labels))
            .map(|s| s.value.snapshot())
    }

    /// Render every defined family in the text exposition format.
    pub fn render(&self) -> Result<String> {
        render::render(self)
    }
}
