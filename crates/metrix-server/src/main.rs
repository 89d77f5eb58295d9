//! metrix server binary.
//!
//! - Config: `METRIX_CONFIG` (default `metrix.yaml`), env overrides
//! - One shared registry, injected through `AppState`
//! - Graceful shutdown on SIGINT / SIGTERM

use std::sync::Arc;

use metrix_core::MetricsRegistry;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use metrix_server::{app_state::AppState, config, error::{Result, ServerError}, router};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "metrix-server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = std::env::var("METRIX_CONFIG").unwrap_or_else(|_| "metrix.yaml".into());
    let cfg = config::load(&path)?;
    let listen = cfg.server.listen_addr()?;

    let state = AppState::new(cfg, Arc::new(MetricsRegistry::new()))?;
    let app = router::build_router(state.clone());

    tracing::info!(%listen, "metrix-server starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| ServerError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .map_err(|e| ServerError::Internal(format!("server failed: {e}")))?;

    tracing::info!("metrix-server stopped");
    Ok(())
}

async fn shutdown_signal(state: AppState) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("SIGINT received, shutting down gracefully"),
        _ = terminate => tracing::info!("SIGTERM received, shutting down gracefully"),
    }
    state.set_draining();
}
