//! Axum router wiring.
//!
//! Every route sits behind the request-tracking middleware, so `/metrics`
//! scrapes are counted like any other request.

use axum::{middleware, routing::get, Router};

use crate::{api, app_state::AppState, obs, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::info::index))
        .route("/health", get(ops::health))
        .route("/ready", get(ops::ready))
        .route("/live", get(ops::live))
        .route("/metrics", get(ops::metrics))
        .route("/synthetic-check", get(api::synthetic::synthetic_check))
        .route("/load", get(api::load::load_default))
        .route("/load/:intensity", get(api::load::load_with_intensity))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            obs::middleware::track_requests,
        ))
        .with_state(state)
}
