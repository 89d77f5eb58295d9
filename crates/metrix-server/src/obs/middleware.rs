//! Per-request HTTP instrumentation.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use metrix_core::MetricsRegistry;

use super::families::{HTTP_ACTIVE_REQUESTS, HTTP_REQUESTS_TOTAL, HTTP_REQUEST_DURATION_SECONDS};
use crate::app_state::AppState;

/// Holds one slot of the in-flight gauge; released on drop so a cancelled
/// request (client went away) still decrements.
struct InFlight<'a> {
    metrics: &'a MetricsRegistry,
    route: &'a str,
}

impl<'a> InFlight<'a> {
    fn enter(metrics: &'a MetricsRegistry, route: &'a str) -> Self {
        metrics.increment_gauge(HTTP_ACTIVE_REQUESTS, &[("route", route)], 1.0);
        Self { metrics, route }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.metrics
            .decrement_gauge(HTTP_ACTIVE_REQUESTS, &[("route", self.route)], 1.0);
    }
}

/// Route label for requests that matched no route, so arbitrary paths
/// cannot mint new series.
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// Record request count, duration, and in-flight gauge. The route label is
/// the matched route template, or [`UNMATCHED_ROUTE`].
pub async fn track_requests(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_owned());

    let metrics = state.metrics();
    let _in_flight = InFlight::enter(&metrics, &route);

    let resp = next.run(req).await;

    let status = resp.status().as_u16().to_string();
    let labels = [
        ("method", method.as_str()),
        ("route", route.as_str()),
        ("status", status.as_str()),
    ];
    metrics.inc_counter(HTTP_REQUESTS_TOTAL, &labels);
    if let Err(e) = metrics.observe_histogram(
        HTTP_REQUEST_DURATION_SECONDS,
        &labels,
        start.elapsed().as_secs_f64(),
    ) {
        tracing::warn!(error = %e, "request duration not recorded");
    }

    resp
}
