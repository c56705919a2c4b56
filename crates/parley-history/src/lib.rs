//! parley-history
//!
//! Best-effort persistence of chat sessions to S3. Persistence failures are
//! logged and never fail the chat response.

pub mod error;
pub mod objects;
pub mod sessions;
