//! The queue consumption loop.
//!
//! `QueueWorker` repeatedly receives a batch, processes each message in
//! batch order, and repeats until the shutdown signal fires. Per-message
//! and per-batch errors are logged and recovered locally - only
//! cancellation stops the loop.

use crate::client::{QueueClient, ReceiveOptions};
use crate::config::WorkerConfig;
use crate::error::ProcessError;
use crate::message::QueueMessage;
use crate::processor::MessageProcessor;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// Queue worker that consumes one queue with at-least-once semantics.
///
/// The shutdown signal is observed at the top of each poll iteration,
/// between messages of a batch, and inside every suspension point
/// (receive wait, simulated work, backoff and poll-interval sleeps).
/// An in-flight message is finished or cancelled cleanly; messages left
/// unprocessed reappear after the visibility timeout.
pub struct QueueWorker<C> {
    client: Arc<C>,
    config: WorkerConfig,
}

impl<C: QueueClient> QueueWorker<C> {
    pub fn new(client: Arc<C>, config: WorkerConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    /// Run the consumption loop until the shutdown signal fires.
    ///
    /// Dropping the sender side of `shutdown` is treated the same as
    /// signalling.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!(
            queue = %self.config.queue_url,
            wait_secs = %self.config.wait_time_secs,
            poll_interval = ?self.config.poll_interval,
            batch_size = %self.config.max_messages,
            "Starting queue worker"
        );

        let mut processor =
            MessageProcessor::new(Arc::clone(&self.client), &self.config, shutdown.clone());
        let opts = ReceiveOptions::from(&self.config);

        loop {
            if *shutdown.borrow() {
                info!("Received shutdown signal, stopping worker");
                break;
            }

            let received = tokio::select! {
                result = self.client.receive(&self.config.queue_url, opts) => result,
                _ = shutdown.wait_for(|stop| *stop) => {
                    info!("Received shutdown signal, stopping worker");
                    break;
                }
            };

            match received {
                Ok(batch) if batch.is_empty() => {
                    debug!("No messages received, continuing to poll");
                }
                Ok(batch) => {
                    info!(count = batch.len(), "Received messages");
                    self.process_batch(&mut processor, &shutdown, batch).await;
                }
                Err(e) => {
                    warn!(
                        error = %e,
                        backoff = ?self.config.error_backoff,
                        "Error receiving messages, backing off"
                    );
                    tokio::select! {
                        _ = tokio::time::sleep(self.config.error_backoff) => {}
                        _ = shutdown.wait_for(|stop| *stop) => {}
                    }
                    continue;
                }
            }

            // Short-poll mode spaces iterations out; long polling relies
            // on the receive wait alone.
            if let Some(interval) = self.config.poll_interval {
                tokio::select! {
                    _ = tokio::time::sleep(interval) => {}
                    _ = shutdown.wait_for(|stop| *stop) => {}
                }
            }
        }

        info!("Queue worker stopped");
    }

    /// Process a batch in delivery order.
    ///
    /// A failed message never blocks the rest of the batch. Once
    /// cancellation is observed, remaining messages are left untouched
    /// for redelivery.
    async fn process_batch(
        &self,
        processor: &mut MessageProcessor<C>,
        shutdown: &watch::Receiver<bool>,
        batch: Vec<QueueMessage>,
    ) {
        for message in batch {
            if *shutdown.borrow() {
                debug!("Shutdown in progress, leaving remaining messages for redelivery");
                break;
            }

            match processor.process(&message).await {
                Ok(()) => {}
                Err(ProcessError::Cancelled) => {
                    info!(
                        message_id = %message.id,
                        "Processing cancelled, message left for redelivery"
                    );
                    break;
                }
                Err(e) => {
                    error!(message_id = %message.id, error = %e, "Error processing message");
                }
            }
        }
    }
}
