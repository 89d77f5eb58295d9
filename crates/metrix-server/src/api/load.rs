//! CPU burn endpoint for exercising latency histograms.

use std::time::Instant;

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::app_state::AppState;
use crate::error::ServerError;
use crate::obs::families;

const ROUTE: &str = "/load/:intensity";
const ITERATIONS_PER_STEP: u64 = 10_000;

/// Parse a requested intensity and clamp it into `1..=max`. Rejects
/// non-numeric, non-finite, and non-positive input.
pub fn parse_intensity(raw: &str, max: u32) -> Option<u32> {
    let requested: f64 = raw.trim().parse().ok()?;
    if !requested.is_finite() || requested <= 0.0 {
        return None;
    }
    Some(requested.round().clamp(1.0, f64::from(max)) as u32)
}

fn burn(iterations: u64) -> f64 {
    (0..iterations).map(|i| (i as f64).sqrt()).sum()
}

pub async fn load_default(state: State<AppState>) -> Response {
    run(state, "1".to_string()).await
}

pub async fn load_with_intensity(state: State<AppState>, Path(raw): Path<String>) -> Response {
    run(state, raw).await
}

async fn run(State(state): State<AppState>, raw: String) -> Response {
    let metrics = state.metrics();

    let Some(intensity) = parse_intensity(&raw, state.cfg().load.max_intensity) else {
        families::record_error(&metrics, ROUTE, 400);
        return ServerError::InvalidIntensity(raw).into_response();
    };

    let iterations = u64::from(intensity) * ITERATIONS_PER_STEP;
    let start = Instant::now();
    let result = match tokio::task::spawn_blocking(move || burn(iterations)).await {
        Ok(r) => r,
        Err(e) => {
            tracing::error!(error = %e, intensity, "load generation failed");
            families::record_error(&metrics, ROUTE, 500);
            return ServerError::Internal(format!("load generation failed: {e}")).into_response();
        }
    };
    let elapsed = start.elapsed();

    let intensity_label = intensity.to_string();
    if let Err(e) = metrics.observe_histogram(
        families::LOAD_TEST_DURATION_SECONDS,
        &[("intensity", intensity_label.as_str())],
        elapsed.as_secs_f64(),
    ) {
        tracing::warn!(error = %e, "load duration not recorded");
    }

    let result: String = result.to_string().chars().take(10).collect();
    Json(json!({
        "message": "Load test completed",
        "intensity": intensity,
        "iterations": iterations,
        "duration_ms": elapsed.as_millis() as u64,
        "result": result,
        "hostname": crate::ops::hostname(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
    .into_response()
}
