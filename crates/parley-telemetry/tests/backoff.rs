use std::time::Duration;

use parley_telemetry::backoff::{RetryPolicy, backoff_delay};

fn policy(base_ms: u64, ceiling_ms: u64) -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        base_backoff: Duration::from_millis(base_ms),
        backoff_ceiling: Duration::from_millis(ceiling_ms),
    }
}

#[test]
fn doubles_per_attempt() {
    let p = policy(1000, 60_000);
    assert_eq!(backoff_delay(&p, 1), Duration::from_secs(1));
    assert_eq!(backoff_delay(&p, 2), Duration::from_secs(2));
    assert_eq!(backoff_delay(&p, 3), Duration::from_secs(4));
    assert_eq!(backoff_delay(&p, 4), Duration::from_secs(8));
}

#[test]
fn caps_at_the_ceiling() {
    let p = policy(1000, 2500);
    assert_eq!(backoff_delay(&p, 1), Duration::from_secs(1));
    assert_eq!(backoff_delay(&p, 2), Duration::from_secs(2));
    assert_eq!(backoff_delay(&p, 3), Duration::from_millis(2500));
    assert_eq!(backoff_delay(&p, 30), Duration::from_millis(2500));
}

#[test]
fn large_attempt_index_does_not_overflow() {
    let p = policy(1000, 8000);
    assert_eq!(backoff_delay(&p, u32::MAX), Duration::from_secs(8));
}

#[test]
fn default_policy_matches_documented_tuning() {
    let p = RetryPolicy::default();
    assert_eq!(p.max_attempts, 3);
    assert_eq!(p.base_backoff, Duration::from_secs(1));
    assert_eq!(p.backoff_ceiling, Duration::from_secs(8));
}
