//! Bus event envelope.
//!
//! The wire format the bus wraps published events in, and the shape
//! queue consumers parse message bodies against. Field names follow the
//! bus wire format (`detail-type`), not Rust conventions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A structured bus event.
///
/// Never mutated after construction; consumers receive it verbatim.
/// Unknown wire fields (account, region, resources, ...) are ignored on
/// deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Event type, e.g. "task.created"
    #[serde(rename = "detail-type")]
    pub detail_type: String,

    /// Publishing service name
    pub source: String,

    /// Arbitrary structured payload
    pub detail: Value,

    /// Publish time (absent on some direct submissions)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
}

impl EventEnvelope {
    /// Construct an envelope stamped with the current time.
    pub fn new(detail_type: impl Into<String>, source: impl Into<String>, detail: Value) -> Self {
        Self {
            detail_type: detail_type.into(),
            source: source.into(),
            detail,
            time: Some(Utc::now()),
        }
    }

    /// The nested `requestData` payload, when the producer attached one.
    pub fn request_data(&self) -> Option<&Value> {
        self.detail.get("requestData")
    }
}
