//! Worker loop tests
//!
//! These exercise the consumption loop end to end against the mock
//! queue client: batch processing, deletion acknowledgment, error
//! isolation, backoff, and graceful cancellation. Tests run with paused
//! time so multi-second delays resolve instantly and deterministically.

use queue_worker::{MockQueueClient, QueueMessage, QueueWorker, WorkerConfig};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

fn test_config() -> WorkerConfig {
    WorkerConfig::new("https://queue.test/demo")
}

/// Spawn the worker and a timer that fires the shutdown signal after
/// `stop_after`, then wait for the loop to return.
async fn run_worker(client: MockQueueClient, config: WorkerConfig, stop_after: Duration) {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let worker = QueueWorker::new(Arc::new(client), config);
    let worker_task = tokio::spawn(async move { worker.run(shutdown_rx).await });

    tokio::time::sleep(stop_after).await;
    shutdown_tx.send(true).unwrap();

    worker_task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_empty_polls_never_invoke_the_processor() {
    let client = MockQueueClient::new();

    // Two 20s empty long polls fit before the signal at 30s
    run_worker(client.clone(), test_config(), Duration::from_secs(30)).await;

    assert_eq!(client.receive_calls().await, 2);
    assert_eq!(client.delete_count().await, 0);
}

#[tokio::test(start_paused = true)]
async fn test_batch_of_three_is_processed_and_deleted_in_order() {
    let client = MockQueueClient::new();
    client
        .push_batch(vec![
            QueueMessage::new("m1", r#"{"detail-type":"task.created","source":"api-svc-a","detail":{}}"#, "r1"),
            QueueMessage::new("m2", r#"{"detail-type":"task.created","source":"api-svc-a","detail":{}}"#, "r2"),
            QueueMessage::new("m3", r#"{"detail-type":"task.created","source":"api-svc-a","detail":{}}"#, "r3"),
        ])
        .await;

    // 3 messages x 2s delay = 6s, signal at 10s during the next poll
    run_worker(client.clone(), test_config(), Duration::from_secs(10)).await;

    assert_eq!(
        client.deleted().await,
        vec!["r1".to_string(), "r2".to_string(), "r3".to_string()]
    );
    // The loop kept polling after the batch
    assert_eq!(client.receive_calls().await, 2);
}

#[tokio::test(start_paused = true)]
async fn test_cancellation_mid_delay_leaves_rest_of_batch() {
    let client = MockQueueClient::new();
    client
        .push_batch(vec![
            QueueMessage::new("m1", "{}", "r1"),
            QueueMessage::new("m2", "{}", "r2"),
            QueueMessage::new("m3", "{}", "r3"),
        ])
        .await;

    // Message 1 completes at t=2s; the signal at t=3s lands in the
    // middle of message 2's simulated work.
    run_worker(client.clone(), test_config(), Duration::from_secs(3)).await;

    // Message 1 was already acknowledged; message 2 was cancelled
    // without a delete; message 3 was never attempted.
    assert_eq!(client.deleted().await, vec!["r1".to_string()]);
    assert_eq!(client.receive_calls().await, 1);
}

#[tokio::test(start_paused = true)]
async fn test_failed_delete_does_not_block_later_messages() {
    let client = MockQueueClient::new();
    client.fail_delete("r1").await;
    client
        .push_batch(vec![
            QueueMessage::new("m1", "{}", "r1"),
            QueueMessage::new("m2", "{}", "r2"),
        ])
        .await;

    run_worker(client.clone(), test_config(), Duration::from_secs(10)).await;

    // m1's delete failed (it will be redelivered); m2 still completed
    assert_eq!(client.deleted().await, vec!["r2".to_string()]);
    assert_eq!(client.receive_calls().await, 2);
}

#[tokio::test(start_paused = true)]
async fn test_malformed_body_degrades_to_opaque_payload() {
    let client = MockQueueClient::new();
    client
        .push_batch(vec![QueueMessage::new("m1", "not json at all", "r1")])
        .await;

    run_worker(client.clone(), test_config(), Duration::from_secs(5)).await;

    // Parse failure is non-fatal: the message still completed
    assert_eq!(client.deleted().await, vec!["r1".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_receive_error_backs_off_and_recovers() {
    let client = MockQueueClient::new();
    client.push_receive_error("network timeout").await;
    client
        .push_batch(vec![QueueMessage::new("m1", "{}", "r1")])
        .await;

    // t=0 receive fails, 5s backoff, t=5 receive succeeds, t=7 deleted
    run_worker(client.clone(), test_config(), Duration::from_secs(12)).await;

    assert_eq!(client.deleted().await, vec!["r1".to_string()]);
    assert!(client.receive_calls().await >= 2);
}

#[tokio::test(start_paused = true)]
async fn test_short_poll_mode_sleeps_between_iterations() {
    let client = MockQueueClient::new();
    client
        .push_batch(vec![QueueMessage::new("m1", "{}", "r1")])
        .await;

    let config = test_config()
        .with_wait_time_secs(1)
        .with_poll_interval(Some(Duration::from_secs(10)));

    // t=0 batch received, t=2 deleted, sleep until t=12, t=12..13 empty
    // poll, sleep until t=23; signal at t=18 lands in that sleep.
    run_worker(client.clone(), config, Duration::from_secs(18)).await;

    assert_eq!(client.deleted().await, vec!["r1".to_string()]);
    assert_eq!(client.receive_calls().await, 2);
}

#[tokio::test(start_paused = true)]
async fn test_signal_is_idempotent() {
    let client = MockQueueClient::new();

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let worker = QueueWorker::new(Arc::new(client.clone()), test_config());
    let worker_task = tokio::spawn(async move { worker.run(shutdown_rx).await });

    tokio::time::sleep(Duration::from_secs(1)).await;
    shutdown_tx.send(true).unwrap();
    // Subsequent signals are no-ops
    shutdown_tx.send(true).unwrap();
    shutdown_tx.send(true).unwrap();

    worker_task.await.unwrap();
    assert_eq!(client.delete_count().await, 0);
}
