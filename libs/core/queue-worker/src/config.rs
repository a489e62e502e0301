//! Worker configuration
//!
//! This module provides `WorkerConfig` for configuring the queue worker.

use core_config::{env_required, env_secs, ConfigError, FromEnv};
use std::time::Duration;

/// Maximum messages the queue service returns per receive call.
pub const MAX_BATCH_SIZE: i32 = 10;

/// Longest wait the queue service supports for a long-poll receive.
pub const MAX_WAIT_TIME_SECS: i32 = 20;

/// Configuration for the queue worker
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Queue URL to consume from (required)
    pub queue_url: String,

    /// Maximum messages per receive call (1..=10)
    pub max_messages: i32,

    /// Seconds the receive call waits for messages (0..=20)
    pub wait_time_secs: i32,

    /// Seconds a received message stays invisible to other consumers
    pub visibility_timeout_secs: i32,

    /// Sleep between poll iterations (None = long polling, the receive
    /// wait bounds the iteration rate on its own)
    pub poll_interval: Option<Duration>,

    /// Simulated per-message processing duration
    pub processing_delay: Duration,

    /// Fixed backoff after a failed receive call
    pub error_backoff: Duration,
}

impl WorkerConfig {
    /// Create a config with long-polling defaults for the given queue.
    pub fn new(queue_url: impl Into<String>) -> Self {
        Self {
            queue_url: queue_url.into(),
            max_messages: MAX_BATCH_SIZE,
            wait_time_secs: MAX_WAIT_TIME_SECS,
            visibility_timeout_secs: 30,
            poll_interval: None,
            processing_delay: Duration::from_secs(2),
            error_backoff: Duration::from_secs(5),
        }
    }

    /// Set the maximum batch size (clamped to 1..=10)
    pub fn with_max_messages(mut self, max: i32) -> Self {
        self.max_messages = max.clamp(1, MAX_BATCH_SIZE);
        self
    }

    /// Set the receive wait time (clamped to 0..=20)
    pub fn with_wait_time_secs(mut self, secs: i32) -> Self {
        self.wait_time_secs = secs.clamp(0, MAX_WAIT_TIME_SECS);
        self
    }

    /// Set the visibility timeout
    pub fn with_visibility_timeout_secs(mut self, secs: i32) -> Self {
        self.visibility_timeout_secs = secs;
        self
    }

    /// Set the sleep between poll iterations (None for long polling)
    pub fn with_poll_interval(mut self, interval: Option<Duration>) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the simulated processing duration
    pub fn with_processing_delay(mut self, delay: Duration) -> Self {
        self.processing_delay = delay;
        self
    }

    /// Set the backoff after failed receive calls
    pub fn with_error_backoff(mut self, backoff: Duration) -> Self {
        self.error_backoff = backoff;
        self
    }

    /// Whether the receive wait alone bounds the iteration rate
    pub fn is_long_polling(&self) -> bool {
        self.poll_interval.is_none()
    }
}

impl FromEnv for WorkerConfig {
    /// Reads from environment variables:
    /// - `SQS_QUEUE_URL` (required): queue to consume from
    /// - `WORKER_INTERVAL`: seconds between polls; setting it switches
    ///   the worker to short polling (1 s receive wait)
    /// - `PROCESSING_DELAY`: seconds of simulated work per message
    fn from_env() -> Result<Self, ConfigError> {
        let queue_url = env_required("SQS_QUEUE_URL")?;
        let mut config = Self::new(queue_url);

        if let Some(interval) = env_secs("WORKER_INTERVAL")? {
            config = config
                .with_poll_interval(Some(Duration::from_secs(interval)))
                .with_wait_time_secs(1);
        }

        if let Some(delay) = env_secs("PROCESSING_DELAY")? {
            config = config.with_processing_delay(Duration::from_secs(delay));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_polling_defaults() {
        let config = WorkerConfig::new("https://queue.test/demo");

        assert_eq!(config.queue_url, "https://queue.test/demo");
        assert_eq!(config.max_messages, 10);
        assert_eq!(config.wait_time_secs, 20);
        assert_eq!(config.visibility_timeout_secs, 30);
        assert_eq!(config.processing_delay, Duration::from_secs(2));
        assert_eq!(config.error_backoff, Duration::from_secs(5));
        assert!(config.is_long_polling());
    }

    #[test]
    fn test_builder_clamps_limits() {
        let config = WorkerConfig::new("https://queue.test/demo")
            .with_max_messages(50)
            .with_wait_time_secs(120);

        assert_eq!(config.max_messages, 10);
        assert_eq!(config.wait_time_secs, 20);

        let config = config.with_max_messages(0).with_wait_time_secs(-1);
        assert_eq!(config.max_messages, 1);
        assert_eq!(config.wait_time_secs, 0);
    }

    #[test]
    fn test_from_env_requires_queue_url() {
        temp_env::with_var_unset("SQS_QUEUE_URL", || {
            let err = WorkerConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("SQS_QUEUE_URL"));
        });
    }

    #[test]
    fn test_from_env_long_polling_by_default() {
        temp_env::with_vars(
            [
                ("SQS_QUEUE_URL", Some("https://queue.test/demo")),
                ("WORKER_INTERVAL", None),
                ("PROCESSING_DELAY", None),
            ],
            || {
                let config = WorkerConfig::from_env().unwrap();
                assert!(config.is_long_polling());
                assert_eq!(config.wait_time_secs, 20);
            },
        );
    }

    #[test]
    fn test_from_env_interval_switches_to_short_polling() {
        temp_env::with_vars(
            [
                ("SQS_QUEUE_URL", Some("https://queue.test/demo")),
                ("WORKER_INTERVAL", Some("10")),
            ],
            || {
                let config = WorkerConfig::from_env().unwrap();
                assert_eq!(config.poll_interval, Some(Duration::from_secs(10)));
                assert_eq!(config.wait_time_secs, 1);
                assert!(!config.is_long_polling());
            },
        );
    }

    #[test]
    fn test_from_env_processing_delay_override() {
        temp_env::with_vars(
            [
                ("SQS_QUEUE_URL", Some("https://queue.test/demo")),
                ("WORKER_INTERVAL", None),
                ("PROCESSING_DELAY", Some("7")),
            ],
            || {
                let config = WorkerConfig::from_env().unwrap();
                assert_eq!(config.processing_delay, Duration::from_secs(7));
            },
        );
    }
}
