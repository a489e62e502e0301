//! Queue Worker Service
//!
//! A background worker that consumes bus events from the task queue.
//!
//! ## Architecture
//!
//! ```text
//! Event bus ({env}-{service}-events)
//!   ↓ (bus rule -> queue subscription)
//! Task queue (SQS)
//!   ↓ (long poll, batches of up to 10)
//! QueueWorker -> MessageProcessor
//!   ↓ (simulated work, then delete)
//! Acknowledged
//! ```
//!
//! ## Features
//!
//! - Long polling by default; `WORKER_INTERVAL` switches to short
//!   polling with that many seconds between checks
//! - At-least-once processing with explicit deletes
//! - Graceful shutdown on SIGINT/SIGTERM (in-flight work finishes or
//!   cancels; undeleted messages are redelivered)
//! - Health endpoint for liveness probes, independent of the loop

use core_config::{Environment, FromEnv, app_info, env_or_default};
use eyre::{Result, WrapErr};
use queue_worker::{QueueWorker, SqsQueueClient, WorkerConfig, health_router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};

/// Start the health HTTP server
///
/// Provides liveness endpoints (`/health`, `/healthz`) that report OK
/// while the process is up.
async fn start_health_server(app_info: core_config::AppInfo, port: u16) -> Result<()> {
    let app = health_router(app_info);

    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind health server to {}", addr))?;

    info!(port = %port, "Health server listening");

    axum::serve(listener, app)
        .await
        .wrap_err("Health server failed")?;

    Ok(())
}

/// Run the queue worker
///
/// This is the main entry point for the worker. It:
/// 1. Sets up structured logging (env-aware: JSON for prod, pretty for dev)
/// 2. Loads the worker configuration from the environment
/// 3. Builds the SQS queue client
/// 4. Starts the worker with graceful shutdown handling
///
/// # Errors
///
/// Returns an error if the queue URL is missing (fatal at startup) or
/// the health server cannot bind.
pub async fn run() -> Result<()> {
    // Initialize tracing (env-aware: JSON for prod, pretty for dev)
    let environment = Environment::from_env();
    core_config::tracing::init_tracing(&environment);

    // App info for the health endpoint
    let app_info = app_info!();

    info!(name = %app_info.name, version = %app_info.version, "Starting queue worker service");
    info!("Environment: {:?}", environment);

    // A missing queue URL is a fatal configuration error
    let config = WorkerConfig::from_env().wrap_err("Failed to load worker configuration")?;
    info!(
        queue = %config.queue_url,
        wait_secs = %config.wait_time_secs,
        poll_interval = ?config.poll_interval,
        processing_delay = ?config.processing_delay,
        "Worker configuration loaded"
    );

    // Health server port (default 8080)
    let health_port: u16 = env_or_default("HEALTH_PORT", &env_or_default("PORT", "8080"))
        .parse()
        .unwrap_or(8080);

    // Build the queue client from the default AWS credential chain
    let client = Arc::new(SqsQueueClient::from_env().await);

    // Set up the shutdown signal
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Spawn shutdown signal handler
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    // Start health server in the background
    tokio::spawn(async move {
        if let Err(e) = start_health_server(app_info, health_port).await {
            error!(error = %e, "Health server failed");
        }
    });

    // Run the worker until cancelled
    let worker = QueueWorker::new(client, config);
    worker.run(shutdown_rx).await;

    info!("Queue worker service stopped");
    Ok(())
}

/// Wait for a shutdown signal (SIGINT or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        },
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        },
    }
}
