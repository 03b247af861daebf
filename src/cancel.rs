/*!
 * Cooperative cancellation for the processing pipeline
 *
 * Every pipeline stage receives a token and polls it between units of work:
 * the collector between directory entries, the writer between files, the
 * cleanup pass between lines. The token is never consulted inside a single
 * blocking read or write, so worst-case cancellation latency is one file's
 * processing time.
 */

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancellation handle, cheap to clone across the pipeline
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token in the not-cancelled state
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Safe to call from a signal handler thread.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Check whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
