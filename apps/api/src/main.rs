//! Task Pipeline API - Entry Point
//!
//! HTTP service that accepts task requests and publishes domain events
//! to the bus (or the log, when running locally).

#[tokio::main]
async fn main() -> eyre::Result<()> {
    pipeline_api::run().await
}
