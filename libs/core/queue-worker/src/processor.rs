//! Per-message processing
//!
//! Each message goes through: payload inspection (lenient), a
//! cancellable simulated workload, and the acknowledging delete.

use crate::client::QueueClient;
use crate::config::WorkerConfig;
use crate::error::ProcessError;
use crate::message::QueueMessage;
use event_bus::EventEnvelope;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Processes one message at a time against a queue client.
///
/// Holds its own shutdown receiver so the simulated workload can be
/// aborted mid-sleep: a cancelled message is returned undeleted and the
/// visibility timeout redelivers it.
pub struct MessageProcessor<C> {
    client: Arc<C>,
    queue_url: String,
    processing_delay: Duration,
    shutdown: watch::Receiver<bool>,
}

impl<C: QueueClient> MessageProcessor<C> {
    pub fn new(client: Arc<C>, config: &WorkerConfig, shutdown: watch::Receiver<bool>) -> Self {
        Self {
            client,
            queue_url: config.queue_url.clone(),
            processing_delay: config.processing_delay,
            shutdown,
        }
    }

    /// Process a single delivery.
    ///
    /// Returns `ProcessError::Cancelled` if shutdown fires during the
    /// simulated work (no delete is attempted), or
    /// `ProcessError::DeleteFailed` if the acknowledging delete fails
    /// (the message will be redelivered).
    pub async fn process(&mut self, message: &QueueMessage) -> Result<(), ProcessError> {
        info!(message_id = %message.id, "Processing message");

        self.inspect_body(message);

        debug!(
            message_id = %message.id,
            delay = ?self.processing_delay,
            "Simulating work"
        );

        tokio::select! {
            _ = tokio::time::sleep(self.processing_delay) => {}
            _ = self.shutdown.wait_for(|stop| *stop) => {
                return Err(ProcessError::Cancelled);
            }
        }

        self.client
            .delete(&self.queue_url, &message.receipt_handle)
            .await
            .map_err(ProcessError::DeleteFailed)?;

        info!(message_id = %message.id, "Successfully processed and deleted message");
        Ok(())
    }

    /// Log what we can about the payload.
    ///
    /// Bodies are usually bus envelopes, but nothing is guaranteed:
    /// a parse failure degrades to an opaque payload and never blocks
    /// processing.
    fn inspect_body(&self, message: &QueueMessage) {
        let value: serde_json::Value = match serde_json::from_str(&message.body) {
            Ok(value) => value,
            Err(e) => {
                warn!(
                    message_id = %message.id,
                    error = %e,
                    "Failed to parse message body, treating as opaque payload"
                );
                return;
            }
        };

        match serde_json::from_value::<EventEnvelope>(value.clone()) {
            Ok(envelope) => {
                info!(
                    detail_type = %envelope.detail_type,
                    source = %envelope.source,
                    "Bus event received"
                );
                if let Some(request_data) = envelope.request_data() {
                    info!(request_data = %request_data, "Event request data");
                }
            }
            Err(_) => {
                info!(message_id = %message.id, payload = %value, "Direct message");
            }
        }
    }
}
