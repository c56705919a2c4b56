use std::time::Duration;

use async_trait::async_trait;

/// Retry tuning for the delivery loop.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Attempt budget per record, including attempts consumed by failed
    /// session initialization.
    pub max_attempts: u32,
    /// Delay after a failed initialization, and the exponential base after
    /// a failed submit.
    pub base_backoff: Duration,
    /// Upper bound on any single backoff sleep.
    pub backoff_ceiling: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_backoff: Duration::from_secs(1),
            backoff_ceiling: Duration::from_secs(8),
        }
    }
}

/// Backoff to sleep after the given 1-based attempt index:
/// `base * 2^(attempt-1)`, capped at the ceiling.
pub fn backoff_delay(policy: &RetryPolicy, attempt: u32) -> Duration {
    let exponent = attempt.saturating_sub(1).min(16);
    let delay = policy.base_backoff.saturating_mul(1 << exponent);
    delay.min(policy.backoff_ceiling)
}

/// Sleep seam so the delivery loop is testable without real delays.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Production sleeper backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
