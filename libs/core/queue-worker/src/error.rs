//! Error types for queue consumption.
//!
//! `QueueError` covers the queue service boundary (receive/delete);
//! `ProcessError` covers per-message processing outcomes. Both are
//! recovered locally by the worker loop - only cancellation stops it.

use thiserror::Error;

/// Errors from the queue service boundary.
#[derive(Error, Debug)]
pub enum QueueError {
    /// Receive call failed (network, throttling). Treated as transient:
    /// the loop backs off and retries.
    #[error("failed to receive messages: {0}")]
    Receive(String),

    /// Delete call failed (network, or expired/unknown receipt handle).
    #[error("failed to delete message: {0}")]
    Delete(String),
}

impl QueueError {
    pub fn receive(message: impl Into<String>) -> Self {
        QueueError::Receive(message.into())
    }

    pub fn delete(message: impl Into<String>) -> Self {
        QueueError::Delete(message.into())
    }
}

/// Outcome of processing a single message.
#[derive(Error, Debug)]
pub enum ProcessError {
    /// Shutdown fired during the simulated work. The message is left
    /// undeleted so the visibility timeout redelivers it.
    #[error("processing cancelled by shutdown")]
    Cancelled,

    /// Work completed but the acknowledging delete failed. The message
    /// stays enqueued and will be redelivered (at-least-once).
    #[error("failed to delete processed message: {0}")]
    DeleteFailed(QueueError),
}

impl ProcessError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ProcessError::Cancelled)
    }
}
