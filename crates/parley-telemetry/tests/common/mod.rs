//! Instrumented fake transport and sleeper shared by the telemetry tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use parley_telemetry::backoff::{RetryPolicy, Sleeper};
use parley_telemetry::record::{DEFAULT_TEXT_LIMIT, InteractionRecord};
use parley_telemetry::transport::{Transport, TransportError, TransportSession};

#[derive(Default)]
pub struct FakeState {
    /// Sessions successfully opened.
    pub opens: usize,
    /// Upcoming `open` calls that should fail before one succeeds.
    pub open_failures: usize,
    /// Underlying close calls observed.
    pub closes: usize,
    /// Sessions currently live.
    pub live: usize,
    /// High-water mark of concurrently live sessions.
    pub max_live: usize,
    /// Submit attempts observed.
    pub submits: usize,
    /// Scripted per-submit outcomes; once empty, submits succeed.
    pub script: VecDeque<Result<(), TransportError>>,
}

#[derive(Clone, Default)]
pub struct FakeTransport {
    state: Arc<Mutex<FakeState>>,
}

impl FakeTransport {
    pub fn scripted(outcomes: Vec<Result<(), TransportError>>) -> Self {
        let transport = Self::default();
        transport.state().script = outcomes.into();
        transport
    }

    pub fn failing_open(failures: usize) -> Self {
        let transport = Self::default();
        transport.state().open_failures = failures;
        transport
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }
}

pub struct FakeSession {
    state: Arc<Mutex<FakeState>>,
    open: bool,
}

#[async_trait]
impl Transport for FakeTransport {
    type Session = FakeSession;

    async fn open(&self) -> Result<FakeSession, TransportError> {
        let mut state = self.state.lock().unwrap();
        if state.open_failures > 0 {
            state.open_failures -= 1;
            return Err(TransportError::connection("injected open failure"));
        }
        state.opens += 1;
        state.live += 1;
        state.max_live = state.max_live.max(state.live);
        Ok(FakeSession {
            state: Arc::clone(&self.state),
            open: true,
        })
    }
}

#[async_trait]
impl TransportSession for FakeSession {
    async fn submit(&mut self, _record: &InteractionRecord) -> Result<(), TransportError> {
        let mut state = self.state.lock().unwrap();
        state.submits += 1;
        state.script.pop_front().unwrap_or(Ok(()))
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        if self.open {
            self.open = false;
            let mut state = self.state.lock().unwrap();
            state.closes += 1;
            state.live -= 1;
        }
        Ok(())
    }
}

/// Records requested sleep durations instead of waiting.
#[derive(Clone, Default)]
pub struct RecordingSleeper {
    slept: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn slept(&self) -> Vec<Duration> {
        self.slept.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.slept.lock().unwrap().push(duration);
    }
}

pub fn policy(max_attempts: u32, base_ms: u64, ceiling_ms: u64) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        base_backoff: Duration::from_millis(base_ms),
        backoff_ceiling: Duration::from_millis(ceiling_ms),
    }
}

pub fn sample_record() -> InteractionRecord {
    InteractionRecord::build("hello", "hi there", 42, DEFAULT_TEXT_LIMIT)
}
