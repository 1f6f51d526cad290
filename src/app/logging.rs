//! Progress logging utilities.

use log::info;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Logs progress information about domain processing.
///
/// # Arguments
///
/// * `start_time` - The start time of processing
/// * `completed` - Counter of successfully located domains
/// * `failed` - Counter of failed domains
pub fn log_progress(start_time: std::time::Instant, completed: &AtomicUsize, failed: &AtomicUsize) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let completed = completed.load(Ordering::SeqCst);
    let failed = failed.load(Ordering::SeqCst);
    let processed = completed + failed;
    let rate = if elapsed_secs > 0.0 {
        processed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Processed {} domains ({} located, {} failed) in {:.2} seconds (~{:.2} domains/sec)",
        processed, completed, failed, elapsed_secs, rate
    );
}
