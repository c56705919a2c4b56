use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::error::TelemetryError;
use crate::record::InteractionRecord;
use crate::transport::{Transport, TransportSession};

/// Exclusive owner of the single live ingestion session.
///
/// All mutation (create, invalidate, replace) and every submit run under one
/// lock, so concurrent callers never observe a half-torn-down session or
/// race to create two live sessions. At most one live session exists per
/// handle at any instant.
pub struct StreamHandle<T: Transport> {
    transport: T,
    session: Mutex<Option<T::Session>>,
}

impl<T: Transport> StreamHandle<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            session: Mutex::new(None),
        }
    }

    /// Ensure a live session exists.
    ///
    /// With `force_reinit`, any existing session is closed (best-effort;
    /// close failures are logged, not propagated) and recreated. An open
    /// failure is reported as [`TelemetryError::Init`] and leaves the handle
    /// empty, so the next call recreates lazily.
    pub async fn acquire(&self, force_reinit: bool) -> Result<(), TelemetryError> {
        let mut slot = self.session.lock().await;
        self.ensure(&mut slot, force_reinit).await
    }

    /// One submit attempt: acquisition and submission run under the same
    /// lock, so the session cannot be closed by another caller mid-attempt.
    pub async fn submit(&self, record: &InteractionRecord) -> Result<(), TelemetryError> {
        let mut slot = self.session.lock().await;
        self.ensure(&mut slot, false).await?;
        match slot.as_mut() {
            Some(session) => Ok(session.submit(record).await?),
            None => Err(TelemetryError::Init("no live session".to_string())),
        }
    }

    /// Close the live session, if any. Idempotent: closing an absent session
    /// is a no-op, and close failures are swallowed (logged only) since
    /// shutdown must not fail the caller.
    pub async fn close(&self) {
        let mut slot = self.session.lock().await;
        close_slot(&mut slot).await;
    }

    async fn ensure(
        &self,
        slot: &mut Option<T::Session>,
        force_reinit: bool,
    ) -> Result<(), TelemetryError> {
        if force_reinit {
            close_slot(slot).await;
        }
        if slot.is_none() {
            info!("opening ingestion session");
            let session = self
                .transport
                .open()
                .await
                .map_err(|e| TelemetryError::Init(e.to_string()))?;
            *slot = Some(session);
            info!("ingestion session ready");
        }
        Ok(())
    }
}

async fn close_slot<S: TransportSession>(slot: &mut Option<S>) {
    if let Some(mut session) = slot.take() {
        match session.close().await {
            Ok(()) => info!("closed ingestion session"),
            Err(e) => warn!(error = %e, "error closing ingestion session"),
        }
    }
}
