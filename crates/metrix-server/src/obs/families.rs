//! Metric family names and their startup registration.

use metrix_core::{MetricKind, MetricsRegistry, Result};

use crate::config::ServerConfig;

pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
pub const HTTP_REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";
pub const HTTP_ACTIVE_REQUESTS: &str = "http_active_requests";
pub const APPLICATION_ERRORS_TOTAL: &str = "application_errors_total";
pub const APPLICATION_READINESS_STATUS: &str = "application_readiness_status";
pub const SYNTHETIC_LATENCY_MS: &str = "synthetic_latency_ms";
pub const LOAD_TEST_DURATION_SECONDS: &str = "load_test_duration_seconds";
pub const APPLICATION_INFO: &str = "application_info";

/// Define every family in exposition order and seed `application_info`.
pub fn register(metrics: &MetricsRegistry, cfg: &ServerConfig) -> Result<()> {
    metrics.define(
        HTTP_REQUESTS_TOTAL,
        MetricKind::Counter,
        "Total number of HTTP requests processed",
        &[],
    )?;
    metrics.define(
        HTTP_REQUEST_DURATION_SECONDS,
        MetricKind::Histogram,
        "Duration of HTTP requests in seconds",
        &cfg.buckets.http_request_duration,
    )?;
    metrics.define(
        HTTP_ACTIVE_REQUESTS,
        MetricKind::Gauge,
        "Number of in-flight HTTP requests",
        &[],
    )?;
    metrics.define(
        APPLICATION_ERRORS_TOTAL,
        MetricKind::Counter,
        "Count of application level errors",
        &[],
    )?;
    metrics.define(
        APPLICATION_READINESS_STATUS,
        MetricKind::Gauge,
        "Readiness status of the application: 1 ready, 0 not ready",
        &[],
    )?;
    metrics.define(
        SYNTHETIC_LATENCY_MS,
        MetricKind::Gauge,
        "Latency from synthetic availability checks in milliseconds",
        &[],
    )?;
    metrics.define(
        LOAD_TEST_DURATION_SECONDS,
        MetricKind::Histogram,
        "Duration of ad-hoc load test executions",
        &cfg.buckets.load_test_duration,
    )?;
    metrics.define(APPLICATION_INFO, MetricKind::Gauge, "Application information", &[])?;

    set_app_info(metrics, cfg);
    Ok(())
}

pub fn set_app_info(metrics: &MetricsRegistry, cfg: &ServerConfig) {
    metrics.set_gauge(
        APPLICATION_INFO,
        &[("project", cfg.app.project.as_str()), ("version", cfg.app.version.as_str())],
        1.0,
    );
}

/// Count one application error for `route`, tagged with its HTTP status.
pub fn record_error(metrics: &MetricsRegistry, route: &str, status: u16) {
    let status = status.to_string();
    metrics.inc_counter(APPLICATION_ERRORS_TOTAL, &[("route", route), ("type", status.as_str())]);
}
