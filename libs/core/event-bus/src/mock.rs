//! Mock event publisher for testing

use crate::error::PublishError;
use crate::publisher::EventPublisher;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Mock publisher that captures published events
pub struct MockPublisher {
    published: Arc<Mutex<Vec<(String, Value)>>>,
    should_fail: bool,
    failure_message: Option<String>,
}

impl MockPublisher {
    /// Create a new mock publisher
    pub fn new() -> Self {
        Self {
            published: Arc::new(Mutex::new(Vec::new())),
            should_fail: false,
            failure_message: None,
        }
    }

    /// Create a mock publisher that always fails (simulated remote error)
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            published: Arc::new(Mutex::new(Vec::new())),
            should_fail: true,
            failure_message: Some(message.into()),
        }
    }

    /// Get all published events as (event_type, detail) pairs
    pub async fn published(&self) -> Vec<(String, Value)> {
        self.published.lock().await.clone()
    }

    /// Get the count of published events
    pub async fn publish_count(&self) -> usize {
        self.published.lock().await.len()
    }

    /// Check if an event of the given type was published
    pub async fn was_published(&self, event_type: &str) -> bool {
        self.published
            .lock()
            .await
            .iter()
            .any(|(published_type, _)| published_type == event_type)
    }
}

impl Default for MockPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for MockPublisher {
    async fn publish(&self, event_type: &str, detail: Value) -> Result<(), PublishError> {
        if self.should_fail {
            let message = self
                .failure_message
                .clone()
                .unwrap_or_else(|| "Mock failure".to_string());
            return Err(PublishError::bus(message));
        }

        self.published
            .lock()
            .await
            .push((event_type.to_string(), detail));

        Ok(())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
