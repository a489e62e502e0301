//! Queue client implementations

pub mod mock;
pub mod sqs;

pub use mock::MockQueueClient;
pub use sqs::SqsQueueClient;

use crate::config::WorkerConfig;
use crate::error::QueueError;
use crate::message::QueueMessage;
use async_trait::async_trait;

/// Parameters for a single receive call.
#[derive(Debug, Clone, Copy)]
pub struct ReceiveOptions {
    /// Maximum messages to return (1..=10)
    pub max_messages: i32,

    /// Seconds to wait for messages before returning (0..=20)
    pub wait_time_secs: i32,

    /// Seconds received messages stay hidden from other consumers
    pub visibility_timeout_secs: i32,
}

impl From<&WorkerConfig> for ReceiveOptions {
    fn from(config: &WorkerConfig) -> Self {
        Self {
            max_messages: config.max_messages,
            wait_time_secs: config.wait_time_secs,
            visibility_timeout_secs: config.visibility_timeout_secs,
        }
    }
}

/// Thin contract over the remote queue service.
///
/// An empty batch from `receive` is a success, not an error. `delete`
/// acknowledges a single delivery by its receipt handle; deleting an
/// expired or unknown receipt is an error the caller logs, never a
/// fatal condition.
#[async_trait]
pub trait QueueClient: Send + Sync {
    /// Receive up to `opts.max_messages` messages, waiting up to
    /// `opts.wait_time_secs` for at least one to arrive.
    async fn receive(
        &self,
        queue_url: &str,
        opts: ReceiveOptions,
    ) -> Result<Vec<QueueMessage>, QueueError>;

    /// Permanently remove one delivery from the queue.
    async fn delete(&self, queue_url: &str, receipt_handle: &str) -> Result<(), QueueError>;
}
