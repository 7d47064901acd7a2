//! Relay sink service.
//!
//! Receives envelopes from the ingestor and proves it can reach storage.
//! Persistence itself is not implemented: the storage connection is opened
//! and closed, and the envelope is acknowledged with `201 Created`.
//!
//! No deduplication happens here; two envelopes for the same delivery carry
//! different ids.

pub mod handlers;
pub mod storage;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::web::MAX_WEBHOOK_BODY_BYTES;

pub use handlers::{receive_envelope, SinkState, SINK_CREATED_BODY};
pub use storage::{StorageError, StorageCheck};

/// Largest envelope accepted: a maximum-size webhook after base64 (4/3) plus
/// room for the other envelope fields.
pub const MAX_ENVELOPE_BODY_BYTES: usize = MAX_WEBHOOK_BODY_BYTES / 3 * 4 + 64 * 1024;

/// Routes served by `gitway-sink`.
pub fn router(state: SinkState) -> Router {
    Router::new()
        .route("/", post(receive_envelope))
        .route("/health", get(crate::web::health))
        .layer(DefaultBodyLimit::max(MAX_ENVELOPE_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
