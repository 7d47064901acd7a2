//! Gitway Ingest - GitHub webhook receiver.
//!
//! This binary hosts the relay pipeline behind a small web server:
//! - Receives webhooks on `POST /webhooks/github`
//! - Verifies the `x-hub-signature-256` HMAC
//! - Wraps the event in an envelope and forwards it to the sink once
//! - Answers with the pipeline's status and body

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gitway::shutdown::shutdown_signal;
use gitway::web::{self, AppState};
use gitway::{Config, Ingestor};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("ingest_server_starting");

    // Load configuration
    let config = Config::from_env();
    info!(
        port = config.port,
        sink_endpoint = %config.sink_endpoint,
        webhook_secret_configured = config.webhook_secret.is_some(),
        sink_auth_configured = config.sink_auth_token.is_some(),
        request_timeout_ms = config.request_timeout_ms,
        "config_loaded"
    );

    let ingestor = Ingestor::new(config.ingestor_config()?)
        .context("Failed to create sink client")?;

    let app = web::router(AppState::new(ingestor));

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "ingest_server_listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal("ingest"))
        .await
        .context("Server error")?;

    info!("ingest_server_shutdown_complete");

    Ok(())
}
