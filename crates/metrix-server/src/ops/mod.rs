//! Operational HTTP endpoints.
//!
//! - `/health`  : service details
//! - `/ready`   : readiness (503 during warm-up or drain)
//! - `/live`    : liveness
//! - `/metrics` : Prometheus text format

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};

use metrix_core::CONTENT_TYPE;

use crate::app_state::AppState;
use crate::error::ServerError;
use crate::obs::{families, process};

fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

pub(crate) fn hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "unknown".into())
}

fn env_or(key: &str, default: impl FnOnce() -> String) -> String {
    std::env::var(key).unwrap_or_else(|_| default())
}

/// Pod placement as exposed by the downward API. `node_name` is only
/// reported on the index route.
pub(crate) fn kubernetes_json(with_node: bool) -> Value {
    let mut k8s = json!({
        "namespace": env_or("KUBERNETES_NAMESPACE", || "default".into()),
        "pod_name": env_or("HOSTNAME", hostname),
        "service_account": env_or("KUBERNETES_SERVICE_ACCOUNT", || "default".into()),
    });
    if with_node {
        k8s["node_name"] = json!(env_or("KUBERNETES_NODE_NAME", || "unknown".into()));
    }
    k8s
}

fn memory_json() -> Value {
    let mut map = Map::new();
    for (kind, bytes) in process::memory_usage() {
        map.insert(kind.to_string(), json!(bytes));
    }
    Value::Object(map)
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let app = &state.cfg().app;
    Json(json!({
        "status": "healthy",
        "timestamp": timestamp(),
        "version": app.version,
        "hostname": hostname(),
        "uptime": state.uptime().as_secs_f64(),
        "memory": memory_json(),
        "environment": app.environment,
        "project": app.project,
        "kubernetes": kubernetes_json(false),
    }))
}

pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let metrics = state.metrics();
    let uptime = state.uptime().as_secs_f64();

    if state.is_ready() {
        metrics.set_gauge(families::APPLICATION_READINESS_STATUS, &[], 1.0);
        (
            StatusCode::OK,
            Json(json!({ "status": "ready", "timestamp": timestamp(), "uptime": uptime })),
        )
    } else {
        metrics.set_gauge(families::APPLICATION_READINESS_STATUS, &[], 0.0);
        let message = if state.is_draining() {
            "Application is shutting down"
        } else {
            "Application is starting up"
        };
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not_ready",
                "timestamp": timestamp(),
                "uptime": uptime,
                "message": message,
            })),
        )
    }
}

pub async fn live(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "alive",
        "timestamp": timestamp(),
        "pid": std::process::id(),
        "uptime": state.uptime().as_secs_f64(),
    }))
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let registry = state.metrics();
    let mut body = match registry.render() {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(error = %e, "metrics render failed");
            families::record_error(&registry, "/metrics", 500);
            return ServerError::from(e).into_response();
        }
    };
    process::render(state.uptime(), &mut body);

    (StatusCode::OK, [(header::CONTENT_TYPE, CONTENT_TYPE)], body).into_response()
}
