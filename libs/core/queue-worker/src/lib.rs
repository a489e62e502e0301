//! Queue Worker Framework
//!
//! A queue consumer with at-least-once semantics: receive a batch,
//! process each message, delete on success, repeat until cancelled.
//!
//! ## Features
//!
//! - **Queue client contract**: `QueueClient` trait with an AWS SQS
//!   implementation and an in-process mock for tests
//! - **Long and short polling**: the receive wait bounds the iteration
//!   rate, or an explicit poll interval does
//! - **Graceful shutdown**: a `watch` signal observed at every
//!   suspension point; in-flight work finishes or cancels cleanly
//! - **Error isolation**: transient queue errors back off and retry;
//!   per-message failures never stop the loop
//! - **Health endpoint**: liveness router independent of loop state
//!
//! ## Example
//!
//! ```ignore
//! use queue_worker::{QueueWorker, SqsQueueClient, WorkerConfig};
//!
//! let config = WorkerConfig::from_env()?;
//! let client = Arc::new(SqsQueueClient::from_env().await);
//! let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!
//! QueueWorker::new(client, config).run(shutdown_rx).await;
//! ```

mod client;
mod config;
mod error;
mod health;
mod message;
mod processor;
mod worker;

// Re-export main types
pub use client::{MockQueueClient, QueueClient, ReceiveOptions, SqsQueueClient};
pub use config::{WorkerConfig, MAX_BATCH_SIZE, MAX_WAIT_TIME_SECS};
pub use error::{ProcessError, QueueError};
pub use health::{health_router, HealthResponse};
pub use message::QueueMessage;
pub use processor::MessageProcessor;
pub use worker::QueueWorker;
