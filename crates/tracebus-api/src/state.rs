//! Application state.

use std::sync::Arc;
use std::time::Instant;

use tokio_util::sync::CancellationToken;

use tracebus_core::Tracer;

/// State shared across handlers.
pub struct AppState {
    pub tracer: Arc<Tracer>,
    /// Parent of every execution's cancellation token.
    pub shutdown: CancellationToken,
    start_time: Instant,
}

impl AppState {
    pub fn new(tracer: Arc<Tracer>) -> Self {
        Self {
            tracer,
            shutdown: CancellationToken::new(),
            start_time: Instant::now(),
        }
    }

    /// Get uptime.
    pub fn uptime(&self) -> std::time::Duration {
        self.start_time.elapsed()
    }

    /// Cancel every running execution and stop accepting new work.
    pub fn request_shutdown(&self) {
        self.shutdown.cancel();
    }

    /// Check if shutdown is requested.
    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown.is_cancelled()
    }
}
