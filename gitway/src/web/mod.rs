//! Web server module for receiving GitHub webhooks.
//!
//! This module is the thin adapter between HTTP and the relay core:
//! - Reads the raw body and signature header into an `InboundEvent`
//! - Runs the `Ingestor`
//! - Turns the `RelayResult` back into a response
//!
//! All verification, parsing and forwarding happens in `crate::relay`.

pub mod handlers;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use handlers::{github_webhook, health, AppState, HealthResponse};

/// GitHub caps webhook payloads at 25 MB.
pub const MAX_WEBHOOK_BODY_BYTES: usize = 25 * 1024 * 1024;

/// Routes served by `gitway-ingest`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/webhooks/github", post(github_webhook))
        .layer(DefaultBodyLimit::max(MAX_WEBHOOK_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
