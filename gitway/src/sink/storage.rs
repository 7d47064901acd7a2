//! Storage connectivity.

use std::time::Duration;

use thiserror::Error;
use tokio::net::TcpStream;
use tracing::{error, info};

/// Failure to reach the storage engine.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("timed out connecting to storage at {addr}")]
    Timeout { addr: String },

    #[error("failed to connect to storage at {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}

/// Opens a fresh storage connection per call and closes it again.
#[derive(Debug, Clone)]
pub struct StorageCheck {
    addr: String,
    timeout: Duration,
}

impl StorageCheck {
    pub fn new(addr: impl Into<String>, timeout: Duration) -> Self {
        Self {
            addr: addr.into(),
            timeout,
        }
    }

    /// Connect to storage, then drop the connection.
    pub async fn connect(&self) -> Result<(), StorageError> {
        let stream = tokio::time::timeout(self.timeout, TcpStream::connect(&self.addr))
            .await
            .map_err(|_| {
                error!(
                    addr = %self.addr,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "storage_connect_timeout"
                );
                StorageError::Timeout {
                    addr: self.addr.clone(),
                }
            })?
            .map_err(|e| {
                error!(addr = %self.addr, error = %e, "storage_connect_failed");
                StorageError::Connect {
                    addr: self.addr.clone(),
                    source: e,
                }
            })?;

        info!(addr = %self.addr, "storage_connected");
        drop(stream);

        Ok(())
    }
}
