//! Event publisher implementations.
//!
//! Two variants behind one trait: a logging publisher for local runs
//! and an EventBridge-backed publisher for deployed environments. The
//! variant is selected once at construction and injected wherever
//! events are emitted - nothing re-reads the environment per call.

use crate::config::PublisherConfig;
use crate::error::PublishError;
use async_trait::async_trait;
use aws_sdk_eventbridge::types::PutEventsRequestEntry;
use aws_sdk_eventbridge::Client;
use chrono::Utc;
use core_config::{ConfigError, FromEnv};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Contract for emitting domain events.
///
/// Publish failures are soft: implementations log and return the error,
/// and the caller's request continues regardless.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish one event with an arbitrary structured detail payload.
    async fn publish(&self, event_type: &str, detail: Value) -> Result<(), PublishError>;

    /// Get the publisher name for logging.
    fn name(&self) -> &'static str;
}

/// Publisher that records events to the log and always succeeds.
///
/// Used whenever the environment flag is unset or "local".
#[derive(Debug, Clone, Default)]
pub struct LogPublisher;

#[async_trait]
impl EventPublisher for LogPublisher {
    async fn publish(&self, event_type: &str, detail: Value) -> Result<(), PublishError> {
        info!(event_type = %event_type, detail = %detail, "Mock event published");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

/// Publisher that submits envelopes to an EventBridge bus.
///
/// The bus name (`{environment}-{serviceName}-events`) and the event
/// source are derived from `PublisherConfig` at construction and fixed
/// for the process lifetime.
pub struct BridgePublisher {
    client: Client,
    bus_name: String,
    source: String,
}

impl BridgePublisher {
    /// Create a publisher from an existing EventBridge SDK client.
    pub fn new(client: Client, config: &PublisherConfig) -> Self {
        Self {
            client,
            bus_name: config.bus_name(),
            source: config.service_name.clone(),
        }
    }

    /// Create from the default AWS SDK config.
    ///
    /// Uses AWS SDK's default credential chain (environment variables,
    /// web identity token, instance profile, shared credentials file).
    pub async fn from_env(config: &PublisherConfig) -> Result<Self, PublishError> {
        let region = std::env::var("AWS_EVENT_BUS_REGION")
            .or_else(|_| std::env::var("AWS_REGION"))
            .ok();

        let mut config_loader = aws_config::from_env();

        if let Some(region_str) = region {
            config_loader = config_loader.region(aws_config::Region::new(region_str));
        }

        let sdk_config = config_loader.load().await;

        Ok(Self::new(Client::new(&sdk_config), config))
    }

    /// The derived bus name this publisher submits to.
    pub fn bus_name(&self) -> &str {
        &self.bus_name
    }
}

#[async_trait]
impl EventPublisher for BridgePublisher {
    async fn publish(&self, event_type: &str, detail: Value) -> Result<(), PublishError> {
        let detail_json = serde_json::to_string(&detail)?;

        let entry = PutEventsRequestEntry::builder()
            .source(&self.source)
            .detail_type(event_type)
            .detail(detail_json)
            .event_bus_name(&self.bus_name)
            .time(aws_sdk_eventbridge::primitives::DateTime::from_millis(
                Utc::now().timestamp_millis(),
            ))
            .build();

        let output = self
            .client
            .put_events()
            .entries(entry)
            .send()
            .await
            .map_err(|e| {
                error!(event_type = %event_type, bus = %self.bus_name, error = %e, "Failed to publish event");
                PublishError::bus(e.to_string())
            })?;

        // PutEvents reports per-entry failures in the response body
        if output.failed_entry_count() > 0 {
            let reason = output
                .entries()
                .iter()
                .find_map(|entry| entry.error_message())
                .unwrap_or("entry rejected by the bus")
                .to_string();
            error!(event_type = %event_type, bus = %self.bus_name, error = %reason, "Failed to publish event");
            return Err(PublishError::bus(reason));
        }

        info!(event_type = %event_type, bus = %self.bus_name, "Event published");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "bus"
    }
}

/// Select a publisher variant from configuration.
///
/// "local" (or an unset flag) selects the logging publisher. A bus
/// publisher that cannot be constructed downgrades to the logging
/// publisher with a warning so the producing service keeps working.
pub async fn publisher_from_config(config: &PublisherConfig) -> Arc<dyn EventPublisher> {
    if config.is_local() {
        info!(environment = %config.environment, "Using logging event publisher");
        return Arc::new(LogPublisher);
    }

    match BridgePublisher::from_env(config).await {
        Ok(publisher) => {
            info!(bus = %publisher.bus_name(), "Using bus event publisher");
            Arc::new(publisher)
        }
        Err(e) => {
            warn!(
                error = %e,
                "Failed to create bus publisher, falling back to logging publisher"
            );
            Arc::new(LogPublisher)
        }
    }
}

/// Select a publisher from `ENVIRONMENT`/`SERVICE_NAME`.
pub async fn publisher_from_env() -> Result<Arc<dyn EventPublisher>, ConfigError> {
    let config = PublisherConfig::from_env()?;
    Ok(publisher_from_config(&config).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_log_publisher_always_succeeds() {
        let publisher = LogPublisher;

        let result = publisher
            .publish("task.created", json!({"taskId": "task-1"}))
            .await;

        assert!(result.is_ok());
        assert_eq!(publisher.name(), "log");
    }

    #[tokio::test]
    async fn test_local_config_selects_logging_publisher() {
        let config = PublisherConfig::new("local", "api-svc-a");
        let publisher = publisher_from_config(&config).await;
        assert_eq!(publisher.name(), "log");
    }

    #[tokio::test]
    async fn test_unset_environment_selects_logging_publisher() {
        let config = PublisherConfig::new("", "api-svc-a");
        let publisher = publisher_from_config(&config).await;
        assert_eq!(publisher.name(), "log");
    }

    #[test]
    fn test_bridge_publisher_fixes_bus_name_at_construction() {
        let config = PublisherConfig::new("prod", "api-svc-a");
        assert_eq!(config.bus_name(), "prod-api-svc-a-events");
    }
}
