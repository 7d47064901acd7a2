//! Graceful shutdown on SIGINT/SIGTERM.

use tokio::signal;
use tracing::info;

/// Create a future that completes when a shutdown signal is received.
///
/// `server` prefixes the final log event, e.g. `ingest_server_shutting_down`.
pub async fn shutdown_signal(server: &'static str) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!(server = server, "Received SIGINT"),
        _ = terminate => info!(server = server, "Received SIGTERM"),
    }

    info!(server = server, "server_shutting_down");
}
