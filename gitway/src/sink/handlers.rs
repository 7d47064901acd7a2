//! Sink endpoint handlers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use tracing::{info, warn};

use crate::config::SinkConfig;
use crate::relay::signature::constant_time_compare;
use crate::relay::{Envelope, AUTH_HEADER};
use crate::sink::storage::StorageCheck;

/// Body returned with `201 Created`.
pub const SINK_CREATED_BODY: &str = "Message sent";

/// Shared sink state.
#[derive(Clone)]
pub struct SinkState {
    pub config: Arc<SinkConfig>,
    pub storage: StorageCheck,
}

impl SinkState {
    pub fn new(config: SinkConfig) -> Self {
        let storage = StorageCheck::new(config.storage_addr.clone(), config.connect_timeout);
        Self {
            config: Arc::new(config),
            storage,
        }
    }
}

/// Envelope intake endpoint.
///
/// This endpoint:
/// 1. Checks the `X-Require-Whisk-Auth` credential (if configured)
/// 2. Decodes the envelope, answering 400 if it is malformed
/// 3. Opens and closes a storage connection
/// 4. Returns 201 Created
///
/// The body is only decoded once the caller is authenticated.
pub async fn receive_envelope(
    State(state): State<SinkState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    if let Some(expected) = state.config.auth_token.as_deref() {
        let provided = headers.get(AUTH_HEADER).and_then(|v| v.to_str().ok());

        match provided {
            Some(provided) if constant_time_compare(provided, expected) => {}
            Some(_) => {
                warn!(body_length = body.len(), "sink_auth_invalid");
                return (StatusCode::UNAUTHORIZED, "unauthorized".to_string());
            }
            None => {
                warn!(body_length = body.len(), "sink_auth_missing");
                return (StatusCode::UNAUTHORIZED, "unauthorized".to_string());
            }
        }
    }

    let envelope: Envelope = match serde_json::from_slice(&body) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!(body_length = body.len(), error = %e, "sink_envelope_invalid");
            return (StatusCode::BAD_REQUEST, format!("invalid envelope: {}", e));
        }
    };

    info!(
        envelope_id = %envelope.id,
        git_id = envelope.git_id,
        message_type = %envelope.message_type,
        payload_length = envelope.payload.len(),
        "sink_envelope_received"
    );

    if let Err(e) = state.storage.connect().await {
        return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
    }

    info!(envelope_id = %envelope.id, "sink_envelope_accepted");

    (StatusCode::CREATED, SINK_CREATED_BODY.to_string())
}
