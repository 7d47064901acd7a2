//! Gitway Sink - Envelope receiver.
//!
//! Accepts envelopes from `gitway-ingest`, checks the shared credential and
//! storage connectivity, and acknowledges with `201 Created`.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gitway::sink::{self, SinkState};
use gitway::shutdown::shutdown_signal;
use gitway::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("sink_server_starting");

    let config = Config::from_env();
    let sink_config = config.sink_config();
    info!(
        port = config.sink_port,
        storage_addr = %sink_config.storage_addr,
        sink_auth_configured = sink_config.auth_token.is_some(),
        "config_loaded"
    );

    let app = sink::router(SinkState::new(sink_config));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.sink_port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "sink_server_listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal("sink"))
        .await
        .context("Server error")?;

    info!("sink_server_shutdown_complete");

    Ok(())
}
