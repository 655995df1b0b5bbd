//! Pulseboard web server.
//!
//! - Activity-tracked pages: `/`, `/app-performance`, `/user-activity`
//! - Relay endpoint: `/request-analysis`
//! - Ops: `/healthz`, `/metrics`

use std::net::SocketAddr;

use pulseboard_core::PulseError;
use tracing_subscriber::{fmt, EnvFilter};

use pulseboard_web::{app_state, config, error::AppError, router};

#[tokio::main]
async fn main() {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    if let Err(e) = run().await {
        tracing::error!("pulseboard failed: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let cfg = config::load_from_env()?;
    let listen: SocketAddr = cfg
        .server
        .listen
        .parse()
        .map_err(|e| AppError::Config(format!("server.listen must be a valid SocketAddr: {e}")))?;

    let state = app_state::AppState::new(cfg)?;
    let app = router::build_router(state);

    tracing::info!(%listen, "pulseboard starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| AppError::Config(format!("failed to bind {listen}: {e}")))?;

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| PulseError::Internal(format!("server failed: {e}")))?;

    tracing::info!("pulseboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, starting graceful shutdown");
}
