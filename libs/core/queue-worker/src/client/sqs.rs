//! AWS SQS queue client
//!
//! ## Configuration
//!
//! The client uses standard AWS SDK credential resolution:
//! - Environment variables: `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`, `AWS_REGION`
//! - IAM roles (EKS IRSA, EC2 instance profile)
//! - Shared credentials file

use super::{QueueClient, ReceiveOptions};
use crate::error::QueueError;
use crate::message::QueueMessage;
use async_trait::async_trait;
use aws_sdk_sqs::Client;
use tracing::{debug, warn};

/// AWS SQS implementation of the queue contract
pub struct SqsQueueClient {
    client: Client,
}

impl SqsQueueClient {
    /// Create a client from an existing SQS SDK client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create from the default AWS SDK config
    ///
    /// Uses AWS SDK's default credential chain:
    /// - Environment variables (`AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`)
    /// - Web identity token (EKS IRSA)
    /// - IAM instance profile (EC2)
    /// - Shared credentials file
    pub async fn from_env() -> Self {
        let region = std::env::var("AWS_SQS_REGION")
            .or_else(|_| std::env::var("AWS_REGION"))
            .ok();

        let mut config_loader = aws_config::from_env();

        if let Some(region_str) = region {
            config_loader = config_loader.region(aws_config::Region::new(region_str));
        }

        let config = config_loader.load().await;

        Self {
            client: Client::new(&config),
        }
    }
}

#[async_trait]
impl QueueClient for SqsQueueClient {
    async fn receive(
        &self,
        queue_url: &str,
        opts: ReceiveOptions,
    ) -> Result<Vec<QueueMessage>, QueueError> {
        let output = self
            .client
            .receive_message()
            .queue_url(queue_url)
            .max_number_of_messages(opts.max_messages)
            .wait_time_seconds(opts.wait_time_secs)
            .visibility_timeout(opts.visibility_timeout_secs)
            .send()
            .await
            .map_err(|e| QueueError::receive(e.to_string()))?;

        let mut batch = Vec::new();

        for message in output.messages.unwrap_or_default() {
            match (message.message_id, message.body, message.receipt_handle) {
                (Some(id), Some(body), Some(receipt_handle)) => {
                    batch.push(QueueMessage {
                        id,
                        body,
                        receipt_handle,
                    });
                }
                (id, _, _) => {
                    // Shouldn't happen: the service always returns all three
                    warn!(message_id = ?id, "Received incomplete message, skipping");
                }
            }
        }

        debug!(queue = %queue_url, count = batch.len(), "Receive completed");

        Ok(batch)
    }

    async fn delete(&self, queue_url: &str, receipt_handle: &str) -> Result<(), QueueError> {
        self.client
            .delete_message()
            .queue_url(queue_url)
            .receipt_handle(receipt_handle)
            .send()
            .await
            .map_err(|e| QueueError::delete(e.to_string()))?;

        debug!(queue = %queue_url, "Delete completed");

        Ok(())
    }
}
