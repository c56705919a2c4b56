use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::backoff::{RetryPolicy, Sleeper, TokioSleeper, backoff_delay};
use crate::error::TelemetryError;
use crate::record::{DEFAULT_TEXT_LIMIT, InteractionRecord};
use crate::stream::StreamHandle;
use crate::transport::Transport;

/// The delivery pipeline: one stream handle plus the retry loop around it.
///
/// `deliver` is best-effort by contract — it returns whether the record was
/// acknowledged and never raises past its boundary, so callers off the chat
/// path can fire and forget.
pub struct Telemetry<T: Transport, S: Sleeper = TokioSleeper> {
    handle: StreamHandle<T>,
    policy: RetryPolicy,
    text_limit: usize,
    sleeper: S,
}

impl<T: Transport> Telemetry<T> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self::with_sleeper(transport, policy, DEFAULT_TEXT_LIMIT, TokioSleeper)
    }
}

impl<T: Transport, S: Sleeper> Telemetry<T, S> {
    pub fn with_sleeper(transport: T, policy: RetryPolicy, text_limit: usize, sleeper: S) -> Self {
        Self {
            handle: StreamHandle::new(transport),
            policy,
            text_limit,
            sleeper,
        }
    }

    pub fn text_limit(&self) -> usize {
        self.text_limit
    }

    /// The underlying stream handle, for startup initialization and the
    /// shutdown guard.
    pub fn handle(&self) -> &StreamHandle<T> {
        &self.handle
    }

    /// Deliver one record with automatic retry and reconnection.
    ///
    /// Returns true once the backend acknowledges the record. A failed
    /// session initialization consumes an attempt and waits the base backoff;
    /// a session-fatal submit failure forces the session to be rebuilt before
    /// the next attempt; a transient failure retries on the same session.
    /// After the attempt budget is exhausted the record is dropped and only
    /// the log stream reflects the failure.
    pub async fn deliver(&self, record: InteractionRecord) -> bool {
        let max_attempts = self.policy.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            match self.handle.submit(&record).await {
                Ok(()) => {
                    info!(
                        telemetry_id = %record.telemetry_id,
                        attempt,
                        "telemetry record acknowledged"
                    );
                    return true;
                }
                Err(TelemetryError::Init(message)) => {
                    warn!(
                        attempt,
                        max_attempts,
                        error = %message,
                        "ingestion session unavailable"
                    );
                    if attempt < max_attempts {
                        self.sleeper.sleep(self.policy.base_backoff).await;
                    }
                }
                Err(TelemetryError::Transport(e)) => {
                    warn!(
                        attempt,
                        max_attempts,
                        kind = ?e.kind,
                        error = %e.message,
                        "telemetry submit failed"
                    );
                    if e.is_session_fatal() {
                        if attempt < max_attempts {
                            info!("ingestion session unusable, rebuilding");
                            if let Err(rebuild) = self.handle.acquire(true).await {
                                // Leave the handle empty; the next attempt
                                // recreates lazily.
                                warn!(error = %rebuild, "failed to rebuild ingestion session");
                            }
                        } else {
                            // Out of attempts; drop the broken session so the
                            // next record starts clean.
                            self.handle.close().await;
                        }
                    }
                    if attempt < max_attempts {
                        let delay = backoff_delay(&self.policy, attempt);
                        debug!(delay_ms = delay.as_millis() as u64, "waiting before retry");
                        self.sleeper.sleep(delay).await;
                    }
                }
            }
        }

        error!(
            telemetry_id = %record.telemetry_id,
            attempts = max_attempts,
            "telemetry delivery exhausted, dropping record"
        );
        false
    }
}

impl<T, S> Telemetry<T, S>
where
    T: Transport + 'static,
    T::Session: 'static,
    S: Sleeper + 'static,
{
    /// Build a record for one completed chat turn and deliver it on a
    /// background task. Fire-and-forget: the caller never observes telemetry
    /// failures, and the latency-critical response path is never blocked.
    pub fn track_interaction(
        self: Arc<Self>,
        user_text: &str,
        assistant_text: &str,
        response_time_ms: u64,
    ) {
        let record = InteractionRecord::build(
            user_text,
            assistant_text,
            response_time_ms,
            self.text_limit,
        );
        tokio::spawn(async move {
            let delivered = self.deliver(record).await;
            debug!(delivered, "telemetry delivery finished");
        });
    }
}
