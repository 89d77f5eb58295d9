use std::time::{Duration, Instant};

use axum::{extract::State, response::IntoResponse, Json};
use rand::Rng;
use serde_json::json;

use crate::app_state::AppState;
use crate::obs::families;

/// Sleep a random `0..max_latency_ms` and publish the measured latency.
pub async fn synthetic_check(State(state): State<AppState>) -> impl IntoResponse {
    let max = state.cfg().synthetic.max_latency_ms;
    let delay = if max == 0 { 0 } else { rand::thread_rng().gen_range(0..max) };

    let start = Instant::now();
    tokio::time::sleep(Duration::from_millis(delay)).await;
    let latency_ms = start.elapsed().as_millis() as u64;

    state
        .metrics()
        .set_gauge(families::SYNTHETIC_LATENCY_MS, &[], latency_ms as f64);

    Json(json!({
        "status": "ok",
        "synthetic_latency_ms": latency_ms,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
