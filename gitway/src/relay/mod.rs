//! Webhook relay core.
//!
//! This module verifies, normalizes and forwards GitHub webhooks:
//! - `signature`: HMAC-SHA256 check of the raw body
//! - `parser`: extraction of the action and actor id
//! - `envelope`: uniquely identified transport envelope
//! - `forwarder`: single POST to the sink
//! - `ingestor`: the stage-by-stage orchestration
//!
//! ## Processing Flow
//!
//! ```text
//! InboundEvent → verify → parse → build → forward → RelayResult
//! ```
//!
//! Nothing here reads the environment or talks HTTP on the inbound side; the
//! `web` module adapts requests and responses.

pub mod envelope;
pub mod error;
pub mod forwarder;
pub mod ingestor;
pub mod parser;
pub mod signature;

pub use envelope::{build, Envelope, GITHUB_MESSAGE_TYPE};
pub use error::{AuthError, ForwardError, IngestError, ParseError};
pub use forwarder::{Forwarder, AUTH_HEADER};
pub use ingestor::{InboundEvent, Ingestor, RelayResult, Stage, NON_CREATED_BODY};
pub use parser::{parse, NormalizedEvent};
pub use signature::{verify, SIGNATURE_HEADER};
