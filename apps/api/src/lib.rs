//! Task Pipeline API
//!
//! HTTP service that accepts task requests and publishes domain events.
//! The publisher variant (logging vs. bus) is selected once at startup
//! from the `ENVIRONMENT` flag and injected into the handlers; publish
//! failures never fail the triggering request.

use core_config::tracing::{init_tracing, install_color_eyre};
use event_bus::publisher_from_config;
use eyre::{Result, WrapErr};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

pub mod api;
pub mod config;
pub mod state;

use config::Config;
use state::AppState;

/// Run the API service.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the listener cannot
/// bind.
pub async fn run() -> Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    info!(name = %config.app.name, version = %config.app.version, "Starting task pipeline API");

    // Select the publisher once at startup and inject it into the state
    let publisher = publisher_from_config(&config.publisher).await;
    info!(publisher = %publisher.name(), "Event publisher initialized");

    let state = AppState {
        app: config.app,
        service_name: config.publisher.service_name.clone(),
        publisher,
    };

    let app = api::routes(state);

    let addr = config.server.address();
    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind {}", addr))?;

    info!(address = %addr, "API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("Server error")?;

    info!("Task pipeline API shutdown complete");
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
            info!("Received Ctrl+C, initiating graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        },
    }
}
