//! HTTP delivery of envelopes to the sink.
//!
//! Exactly one POST per call. Only `201 Created` counts as success; any other
//! status, other 2xx included, is handed back with the sink's own code.

use std::time::Duration;

use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use tracing::{error, info, warn};
use url::Url;

use super::envelope::Envelope;
use super::error::ForwardError;
use super::ingestor::RelayResult;

/// Header carrying the sink credential.
pub const AUTH_HEADER: &str = "X-Require-Whisk-Auth";

/// Posts envelopes to a single sink endpoint.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: Client,
    endpoint: Url,
    auth_token: String,
}

impl Forwarder {
    /// Create a forwarder whose requests are bounded by `timeout`.
    ///
    /// Idle connections are not kept between calls.
    pub fn new(endpoint: Url, auth_token: String, timeout: Duration) -> Result<Self, ForwardError> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(ForwardError::Request)?;

        Ok(Self {
            client,
            endpoint,
            auth_token,
        })
    }

    /// Serialize `envelope` and POST it to the sink once. No retry.
    pub async fn forward(&self, envelope: &Envelope) -> Result<RelayResult, ForwardError> {
        let body = serde_json::to_vec(envelope)?;

        info!(
            envelope_id = %envelope.id,
            endpoint = %self.endpoint,
            body_length = body.len(),
            "envelope_forwarding"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(AUTH_HEADER, self.auth_token.as_str())
            .body(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    error!(envelope_id = %envelope.id, error = %e, "sink_request_timeout");
                } else {
                    error!(envelope_id = %envelope.id, error = %e, "sink_request_failed");
                }
                ForwardError::from_send(e)
            })?;

        let status = response.status();

        if status == StatusCode::CREATED {
            info!(envelope_id = %envelope.id, "envelope_forwarded");
            Ok(RelayResult::created())
        } else {
            warn!(
                envelope_id = %envelope.id,
                status_code = status.as_u16(),
                "sink_rejected"
            );
            Ok(RelayResult::sink_rejected(status.as_u16()))
        }
    }
}
