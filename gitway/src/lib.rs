//! Gitway - GitHub webhook ingestion and relay.
//!
//! This library provides shared modules for the two Gitway binaries:
//! - `gitway-ingest`: Web server that verifies and relays GitHub webhooks
//! - `gitway-sink`: Receiver that acknowledges relayed envelopes
//!
//! ## Architecture
//!
//! ```text
//! GitHub → gitway-ingest (verify → parse → envelope → forward) → gitway-sink → storage
//! ```

pub mod config;
pub mod relay;
pub mod shutdown;
pub mod sink;
pub mod web;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use config::{Config, IngestorConfig, SinkConfig};
pub use relay::{Envelope, InboundEvent, Ingestor, NormalizedEvent, RelayResult};
pub use sink::SinkState;
pub use web::AppState;
