//! Mock queue client for testing
//!
//! Serves scripted receive results in order and records deletes. When
//! the script runs dry, `receive` simulates an empty long poll by
//! sleeping for the requested wait time before returning no messages.

use super::{QueueClient, ReceiveOptions};
use crate::error::QueueError;
use crate::message::QueueMessage;
use async_trait::async_trait;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

enum ScriptedReceive {
    Batch(Vec<QueueMessage>),
    Error(String),
}

#[derive(Default)]
struct MockState {
    script: VecDeque<ScriptedReceive>,
    deleted: Vec<String>,
    failing_deletes: HashSet<String>,
    receive_calls: usize,
}

/// Mock queue client that serves scripted batches and records deletes
#[derive(Clone, Default)]
pub struct MockQueueClient {
    state: Arc<Mutex<MockState>>,
}

impl MockQueueClient {
    /// Create a mock with an empty script (every receive is an empty poll)
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a batch to be returned by the next unserved receive call
    pub async fn push_batch(&self, batch: Vec<QueueMessage>) {
        self.state
            .lock()
            .await
            .script
            .push_back(ScriptedReceive::Batch(batch));
    }

    /// Queue a receive failure
    pub async fn push_receive_error(&self, message: impl Into<String>) {
        self.state
            .lock()
            .await
            .script
            .push_back(ScriptedReceive::Error(message.into()));
    }

    /// Make deletes for the given receipt handle fail
    pub async fn fail_delete(&self, receipt_handle: impl Into<String>) {
        self.state
            .lock()
            .await
            .failing_deletes
            .insert(receipt_handle.into());
    }

    /// Receipt handles deleted so far, in delete order
    pub async fn deleted(&self) -> Vec<String> {
        self.state.lock().await.deleted.clone()
    }

    /// Number of successful deletes
    pub async fn delete_count(&self) -> usize {
        self.state.lock().await.deleted.len()
    }

    /// Number of receive calls made
    pub async fn receive_calls(&self) -> usize {
        self.state.lock().await.receive_calls
    }
}

#[async_trait]
impl QueueClient for MockQueueClient {
    async fn receive(
        &self,
        _queue_url: &str,
        opts: ReceiveOptions,
    ) -> Result<Vec<QueueMessage>, QueueError> {
        let scripted = {
            let mut state = self.state.lock().await;
            state.receive_calls += 1;
            state.script.pop_front()
        };

        match scripted {
            Some(ScriptedReceive::Batch(batch)) => Ok(batch),
            Some(ScriptedReceive::Error(message)) => Err(QueueError::receive(message)),
            None => {
                // Empty queue: behave like a long poll that times out
                tokio::time::sleep(Duration::from_secs(opts.wait_time_secs.max(0) as u64)).await;
                Ok(Vec::new())
            }
        }
    }

    async fn delete(&self, _queue_url: &str, receipt_handle: &str) -> Result<(), QueueError> {
        let mut state = self.state.lock().await;

        if state.failing_deletes.contains(receipt_handle) {
            return Err(QueueError::delete("receipt handle is invalid or expired"));
        }

        state.deleted.push(receipt_handle.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> ReceiveOptions {
        ReceiveOptions {
            max_messages: 10,
            wait_time_secs: 0,
            visibility_timeout_secs: 30,
        }
    }

    #[tokio::test]
    async fn test_mock_serves_batches_in_order() {
        let client = MockQueueClient::new();
        client
            .push_batch(vec![QueueMessage::new("m1", "{}", "r1")])
            .await;
        client.push_receive_error("throttled").await;

        let batch = client.receive("q", opts()).await.unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].id, "m1");

        assert!(client.receive("q", opts()).await.is_err());

        let batch = client.receive("q", opts()).await.unwrap();
        assert!(batch.is_empty());
        assert_eq!(client.receive_calls().await, 3);
    }

    #[tokio::test]
    async fn test_mock_records_deletes() {
        let client = MockQueueClient::new();
        client.fail_delete("r2").await;

        client.delete("q", "r1").await.unwrap();
        assert!(client.delete("q", "r2").await.is_err());

        assert_eq!(client.deleted().await, vec!["r1".to_string()]);
        assert_eq!(client.delete_count().await, 1);
    }
}
