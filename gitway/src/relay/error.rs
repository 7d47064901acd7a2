//! Error taxonomy for the relay pipeline.
//!
//! Every failure is terminal for the request that produced it. The mapping to
//! a caller-visible status/body pair lives in [`IngestError::into_relay_result`].
//! A sink that answers with something other than 201 is not an error here: the
//! forwarder reports it as a [`RelayResult::sink_rejected`] outcome.

use thiserror::Error;

use super::ingestor::RelayResult;

/// Signature verification failed.
///
/// Deliberately carries no detail: a missing header, a wrong algorithm prefix
/// and a digest mismatch are indistinguishable to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("error validating signature")]
pub struct AuthError;

/// The payload is neither a JSON object nor `null`.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("payload is not a JSON object")]
    NotAnObject,
}

/// The envelope could not be delivered to the sink.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("failed to serialize envelope: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to build sink request: {0}")]
    Request(#[source] reqwest::Error),

    #[error("failed to reach sink: {0}")]
    Transport(#[source] reqwest::Error),
}

impl ForwardError {
    /// Classify a `reqwest` error raised while sending.
    pub fn from_send(err: reqwest::Error) -> Self {
        if err.is_builder() {
            ForwardError::Request(err)
        } else {
            ForwardError::Transport(err)
        }
    }
}

/// Any failure that ends a pipeline run.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Forward(#[from] ForwardError),
}

impl IngestError {
    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            IngestError::Auth(_) => "auth",
            IngestError::Parse(_) => "parse",
            IngestError::Forward(ForwardError::Serialize(_)) => "serialize",
            IngestError::Forward(ForwardError::Request(_)) => "request",
            IngestError::Forward(ForwardError::Transport(_)) => "transport",
        }
    }

    /// Convert into the status/body pair handed back to the invocation host.
    pub fn into_relay_result(self) -> RelayResult {
        match self {
            IngestError::Auth(e) => RelayResult::new(401, e.to_string()),
            IngestError::Parse(e) => RelayResult::new(400, e.to_string()),
            IngestError::Forward(e) => RelayResult::new(500, e.to_string()),
        }
    }
}
