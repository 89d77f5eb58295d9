use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::app_state::AppState;
use crate::obs::families;
use crate::ops::{hostname, kubernetes_json};

pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let cfg = state.cfg();
    families::set_app_info(&state.metrics(), cfg);

    Json(json!({
        "message": "metrix monitoring demo service",
        "hostname": hostname(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": cfg.app.version,
        "project": cfg.app.project,
        "environment": cfg.app.environment,
        "kubernetes_info": kubernetes_json(true),
        "features": [
            "Prometheus metrics exposition",
            "Request count, latency, and in-flight tracking",
            "Readiness and liveness probes",
            "Synthetic latency checks",
            "CPU load generation",
        ],
    }))
}
