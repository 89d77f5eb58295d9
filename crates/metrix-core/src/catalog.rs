//! Metric catalog: one immutable definition per name, kept in registration
//! order.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{MetricsError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Gauge,
    Histogram,
}

impl MetricKind {
    /// Name used on the `# TYPE` line.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
            MetricKind::Histogram => "histogram",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricDef {
    pub name: String,
    pub kind: MetricKind,
    pub help: String,
    /// Inclusive upper bounds, ascending. Empty unless `kind` is histogram.
    pub buckets: Vec<f64>,
}

#[derive(Default)]
struct CatalogInner {
    order: Vec<Arc<MetricDef>>,
    by_name: HashMap<String, Arc<MetricDef>>,
}

#[derive(Default)]
pub struct Catalog {
    inner: RwLock<CatalogInner>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a metric. The first definition of a name wins; later calls
    /// return `Ok(false)` without touching it. Returns `Ok(true)` when this
    /// call created the definition.
    pub fn define(&self, name: &str, kind: MetricKind, help: &str, buckets: &[f64]) -> Result<bool> {
        if self.lookup(name).is_some() {
            return Ok(false);
        }

        let buckets = match kind {
            MetricKind::Histogram => {
                validate_buckets(name, buckets)?;
                buckets.to_vec()
            }
            MetricKind::Counter | MetricKind::Gauge => Vec::new(),
        };

        let mut inner = self
            .inner
            .write()
            .map_err(|_| MetricsError::Internal("catalog lock poisoned".into()))?;
        // Re-check under the write lock: another caller may have won the race.
        if inner.by_name.contains_key(name) {
            return Ok(false);
        }

        let def = Arc::new(MetricDef {
            name: name.to_string(),
            kind,
            help: help.to_string(),
            buckets,
        });
        inner.by_name.insert(def.name.clone(), Arc::clone(&def));
        inner.order.push(def);
        Ok(true)
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<MetricDef>> {
        let inner = self.inner.read().ok()?;
        inner.by_name.get(name).cloned()
    }

    /// Definitions in registration order.
    pub fn snapshot(&self) -> Result<Vec<Arc<MetricDef>>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| MetricsError::Internal("catalog lock poisoned".into()))?;
        Ok(inner.order.clone())
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|i| i.order.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn validate_buckets(name: &str, buckets: &[f64]) -> Result<()> {
    let invalid = |reason: &str| MetricsError::InvalidBuckets {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if buckets.iter().any(|b| !b.is_finite()) {
        return Err(invalid("bounds must be finite (+Inf is implicit)"));
    }
    if buckets.windows(2).any(|w| w[0] >= w[1]) {
        return Err(invalid("bounds must be strictly ascending"));
    }
    Ok(())
}
