//! REST API server binary.
//!
//! ```bash
//! # Run with config discovery (./gtasks.toml, then ~/.config/gtasks.toml)
//! cargo run --bin gtasks-server
//!
//! # Override the bind address and credentials path
//! GTASKS_BIND=0.0.0.0:9000 GTASKS_CREDENTIALS=/etc/gtasks/credentials.json \
//!     cargo run --bin gtasks-server
//! ```

use std::time::Duration;

use tokio::signal;
use tracing::info;

use gtasks_api::{build_router, AppState};
use gtasks_shared::{logging, GtasksConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_tracing("gtasks_api=info,tower_http=info");

    info!("Starting gtasks REST server");
    info!("   Version: {}", env!("CARGO_PKG_VERSION"));

    let config = GtasksConfig::load();
    let state = AppState::from_config(&config)?.into_shared();
    let router = build_router(
        state,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    info!("   Listening on http://{}", listener.local_addr()?);
    info!("   Press Ctrl+C to shutdown gracefully");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gtasks REST server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C");
        },
        _ = terminate => {
            info!("Received SIGTERM");
        },
    }
}
