//! Graceful shutdown handling.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Stops background tasks and waits for them to exit.
///
/// The progress logger is cancelled and awaited. The event tracer stops on its
/// own once every event bus handle is dropped; it is given `drain_timeout` to
/// log what is still queued.
pub async fn shutdown_gracefully(
    cancel: CancellationToken,
    logging_task: Option<tokio::task::JoinHandle<()>>,
    event_task: Option<tokio::task::JoinHandle<()>>,
    drain_timeout: Duration,
) {
    cancel.cancel();
    if let Some(logging_task) = logging_task {
        let _ = logging_task.await;
    }

    if let Some(event_task) = event_task {
        if tokio::time::timeout(drain_timeout, event_task).await.is_err() {
            log::debug!("Event tracer did not drain within {drain_timeout:?}");
        }
    }
}
