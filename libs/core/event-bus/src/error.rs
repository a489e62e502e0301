//! Error types for event publishing.
//!
//! Publish failures are soft errors: they are logged and returned to
//! the caller, and the request that triggered the publish continues.

use thiserror::Error;

/// Errors from the publish path.
#[derive(Error, Debug)]
pub enum PublishError {
    /// The event detail could not be serialized to the wire format
    #[error("failed to serialize event detail: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The remote bus rejected or failed the submission
    #[error("bus submission failed: {0}")]
    Bus(String),
}

impl PublishError {
    pub fn bus(message: impl Into<String>) -> Self {
        PublishError::Bus(message.into())
    }
}
