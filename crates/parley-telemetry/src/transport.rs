//! The opaque ingestion transport seam.
//!
//! The delivery loop only sees these traits plus a structured error kind, so
//! the decision "rebuild the session or retry on it" never depends on vendor
//! error strings. Production uses [`crate::firehose::FirehoseTransport`];
//! tests inject instrumented fakes.

use async_trait::async_trait;
use thiserror::Error;

use crate::record::InteractionRecord;

/// How a transport failure affects the session that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// The session itself is unusable and must be rebuilt.
    Connection,
    /// The backend rejected the session's credentials; a rebuilt session
    /// re-authenticates from scratch.
    Auth,
    /// A per-record failure. The session is still usable; retry on it.
    Transient,
}

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self {
            kind: TransportErrorKind::Connection,
            message: message.into(),
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self {
            kind: TransportErrorKind::Auth,
            message: message.into(),
        }
    }

    pub fn transient(message: impl Into<String>) -> Self {
        Self {
            kind: TransportErrorKind::Transient,
            message: message.into(),
        }
    }

    /// Whether the session that produced this error must be torn down and
    /// rebuilt before the next attempt.
    pub fn is_session_fatal(&self) -> bool {
        matches!(
            self.kind,
            TransportErrorKind::Connection | TransportErrorKind::Auth
        )
    }
}

/// A factory for outbound ingestion sessions. Destination and credentials
/// are fixed at construction and never re-read per attempt.
#[async_trait]
pub trait Transport: Send + Sync {
    type Session: TransportSession;

    /// Create a new session: network and auth round trip.
    async fn open(&self) -> Result<Self::Session, TransportError>;
}

/// One live outbound session. Owned exclusively by
/// [`crate::stream::StreamHandle`]; no other component holds a reference
/// across calls.
#[async_trait]
pub trait TransportSession: Send {
    /// Submit one record and wait for the backend's acknowledgment.
    async fn submit(&mut self, record: &InteractionRecord) -> Result<(), TransportError>;

    /// Tear the session down.
    async fn close(&mut self) -> Result<(), TransportError>;
}
