//! Shared application state for the metrix server.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use metrix_core::MetricsRegistry;

use crate::config::ServerConfig;
use crate::error::Result;
use crate::obs::families;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    metrics: Arc<MetricsRegistry>,
}

struct AppStateInner {
    cfg: ServerConfig,
    started: Instant,
    draining: AtomicBool,
}

impl AppState {
    /// Build application state around `metrics` and register the service's
    /// metric families on it.
    pub fn new(cfg: ServerConfig, metrics: Arc<MetricsRegistry>) -> Result<Self> {
        families::register(&metrics, &cfg)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                started: Instant::now(),
                draining: AtomicBool::new(false),
            }),
            metrics,
        })
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn metrics(&self) -> Arc<MetricsRegistry> {
        Arc::clone(&self.metrics)
    }

    pub fn uptime(&self) -> Duration {
        self.inner.started.elapsed()
    }

    /// Mark draining state (shutdown in progress).
    pub fn set_draining(&self) {
        self.inner.draining.store(true, Ordering::Relaxed);
    }

    pub fn is_draining(&self) -> bool {
        self.inner.draining.load(Ordering::Relaxed)
    }

    /// Ready once uptime strictly exceeds the warm-up and no shutdown is in
    /// progress.
    pub fn is_ready(&self) -> bool {
        !self.is_draining() && self.uptime() > Duration::from_secs(self.cfg().server.ready_after_secs)
    }
}
