//! Progress logging.

use std::time::Instant;

use log::info;

/// Logs how many targets are done and the throughput so far.
pub fn log_progress(start_time: Instant, completed: usize, total: usize) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let rate = if elapsed_secs > 0.0 {
        completed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Scanned {}/{} targets in {:.2} seconds (~{:.2} targets/sec)",
        completed, total, elapsed_secs, rate
    );
}
