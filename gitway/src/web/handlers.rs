//! Webhook endpoint handlers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::warn;

use crate::relay::{InboundEvent, Ingestor, RelayResult, SIGNATURE_HEADER};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub ingestor: Arc<Ingestor>,
}

impl AppState {
    pub fn new(ingestor: Ingestor) -> Self {
        Self {
            ingestor: Arc::new(ingestor),
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// GitHub Webhook
// =============================================================================

impl IntoResponse for RelayResult {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or_else(|_| {
            warn!(status_code = self.status, "relay_status_out_of_range");
            StatusCode::BAD_GATEWAY
        });
        (status, self.body).into_response()
    }
}

/// GitHub webhook endpoint.
///
/// The body is taken as raw bytes so the signature is checked against exactly
/// what GitHub sent.
pub async fn github_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> RelayResult {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let event = InboundEvent {
        payload: body.to_vec(),
        signature: header(SIGNATURE_HEADER),
        content_type: header(CONTENT_TYPE.as_str()),
    };

    state.ingestor.handle(event).await
}
