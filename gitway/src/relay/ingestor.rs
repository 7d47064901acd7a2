//! Pipeline orchestration.
//!
//! ```text
//! Received → Authenticated → Parsed → Enveloped → Forwarded → Succeeded | Failed(kind)
//! ```
//!
//! Stages run strictly in order and the first failure ends the run, so an
//! unauthenticated body is never parsed and no partial envelope is ever sent.

use std::fmt;

use tracing::{error, info, warn};

use crate::config::IngestorConfig;

use super::envelope::{self, Envelope, GITHUB_MESSAGE_TYPE};
use super::error::{ForwardError, IngestError};
use super::forwarder::Forwarder;
use super::parser;
use super::signature;

/// Body returned when the sink answers with anything other than 201.
pub const NON_CREATED_BODY: &str = "Sink returned non-created status code";

/// One webhook delivery as handed over by the invocation host.
#[derive(Debug, Clone, Default)]
pub struct InboundEvent {
    /// Raw request body
    pub payload: Vec<u8>,
    /// `x-hub-signature-256` header, if sent
    pub signature: Option<String>,
    pub content_type: Option<String>,
}

/// Terminal status/body pair returned to the invocation host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayResult {
    pub status: u16,
    pub body: String,
}

impl RelayResult {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// The sink acknowledged creation.
    pub fn created() -> Self {
        Self::new(201, "Created")
    }

    /// The sink answered, but not with 201.
    pub fn sink_rejected(status: u16) -> Self {
        Self::new(status, NON_CREATED_BODY)
    }

    pub fn is_created(&self) -> bool {
        self.status == 201
    }
}

/// Pipeline position, used to tag log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    Authenticated,
    Parsed,
    Enveloped,
    Forwarded,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Received => "received",
            Stage::Authenticated => "authenticated",
            Stage::Parsed => "parsed",
            Stage::Enveloped => "enveloped",
            Stage::Forwarded => "forwarded",
        };
        f.write_str(name)
    }
}

/// Verifies, normalizes and relays GitHub webhooks.
///
/// Holds no per-request state; concurrent calls to [`Ingestor::handle`] are
/// independent of each other.
#[derive(Debug, Clone)]
pub struct Ingestor {
    secret: Vec<u8>,
    forwarder: Forwarder,
}

impl Ingestor {
    pub fn new(config: IngestorConfig) -> Result<Self, ForwardError> {
        let forwarder = Forwarder::new(config.sink_endpoint, config.auth_token, config.timeout)?;

        Ok(Self {
            secret: config.secret,
            forwarder,
        })
    }

    /// Run one delivery through the pipeline and report the outcome.
    pub async fn handle(&self, event: InboundEvent) -> RelayResult {
        info!(
            stage = %Stage::Received,
            payload_length = event.payload.len(),
            has_signature = event.signature.is_some(),
            content_type = event.content_type.as_deref().unwrap_or(""),
            "webhook_received"
        );

        match self.run(&event).await {
            Ok(result) => result,
            Err(e) => {
                match &e {
                    IngestError::Auth(_) => warn!(kind = e.kind(), "webhook_rejected"),
                    IngestError::Parse(err) => {
                        warn!(kind = e.kind(), error = %err, "webhook_rejected")
                    }
                    IngestError::Forward(err) => {
                        error!(kind = e.kind(), error = %err, "webhook_relay_failed")
                    }
                }
                e.into_relay_result()
            }
        }
    }

    async fn run(&self, event: &InboundEvent) -> Result<RelayResult, IngestError> {
        let signature_header = event.signature.as_deref().unwrap_or_default();
        signature::verify(signature_header, &event.payload, &self.secret)?;
        info!(stage = %Stage::Authenticated, "webhook_authenticated");

        let normalized = parser::parse(&event.payload)?;
        info!(
            stage = %Stage::Parsed,
            action = %normalized.action,
            git_id = normalized.actor_id,
            "webhook_parsed"
        );

        let envelope: Envelope = envelope::build(&normalized, &event.payload, GITHUB_MESSAGE_TYPE);
        info!(
            stage = %Stage::Enveloped,
            envelope_id = %envelope.id,
            message_type = %envelope.message_type,
            "envelope_built"
        );

        let result = self.forwarder.forward(&envelope).await?;
        info!(
            stage = %Stage::Forwarded,
            envelope_id = %envelope.id,
            status_code = result.status,
            succeeded = result.is_created(),
            "webhook_relayed"
        );

        Ok(result)
    }
}
