//! Queue Worker Service - Entry Point
//!
//! Background worker that consumes bus events from the task queue.

#[tokio::main]
async fn main() -> eyre::Result<()> {
    pipeline_worker::run().await
}
