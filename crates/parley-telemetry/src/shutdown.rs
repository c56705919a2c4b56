use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;

use crate::backoff::{Sleeper, TokioSleeper};
use crate::pipeline::Telemetry;
use crate::transport::Transport;

/// Closes the telemetry stream exactly once during orderly shutdown.
///
/// `shutdown` may be called from more than one teardown path (signal
/// handler, server exit); only the first call closes the underlying session,
/// and nothing propagates past the shutdown boundary.
pub struct ShutdownGuard<T: Transport, S: Sleeper = TokioSleeper> {
    telemetry: Arc<Telemetry<T, S>>,
    closed: AtomicBool,
}

impl<T: Transport, S: Sleeper> ShutdownGuard<T, S> {
    pub fn new(telemetry: Arc<Telemetry<T, S>>) -> Self {
        Self {
            telemetry,
            closed: AtomicBool::new(false),
        }
    }

    pub async fn shutdown(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        info!("closing telemetry stream");
        self.telemetry.handle().close().await;
    }
}
