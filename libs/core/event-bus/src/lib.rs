//! Event bus publishing
//!
//! Emitting domain events to a pub/sub bus, behind a two-variant
//! publisher abstraction:
//!
//! - `LogPublisher`: records events to the log; selected when the
//!   environment flag is unset or "local"
//! - `BridgePublisher`: submits envelopes to an EventBridge bus named
//!   `{environment}-{serviceName}-events`
//!
//! The variant is selected once at construction (`publisher_from_env`)
//! and injected into whatever emits events. Publish failures are soft:
//! logged, returned to the caller, never fatal to the triggering
//! request.
//!
//! ## Example
//!
//! ```ignore
//! use event_bus::publisher_from_env;
//! use serde_json::json;
//!
//! let publisher = publisher_from_env().await?;
//! if let Err(e) = publisher.publish("task.created", json!({"taskId": id})).await {
//!     tracing::error!(error = %e, "Failed to publish event");
//! }
//! // the request continues either way
//! ```

mod config;
mod envelope;
mod error;
mod mock;
mod publisher;

// Re-export main types
pub use config::{PublisherConfig, LOCAL_ENVIRONMENT};
pub use envelope::EventEnvelope;
pub use error::PublishError;
pub use mock::MockPublisher;
pub use publisher::{
    publisher_from_config, publisher_from_env, BridgePublisher, EventPublisher, LogPublisher,
};
