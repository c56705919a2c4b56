use thiserror::Error;

use crate::transport::TransportError;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to initialize ingestion session: {0}")]
    Init(String),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
