//! parley-telemetry
//!
//! Best-effort delivery of per-turn interaction records to a managed
//! ingestion stream. The stream backend terminates long-lived sessions
//! periodically, so delivery runs through a retry loop that distinguishes
//! "the pipe broke, rebuild it" from "this record was rejected, retry on
//! the same session". Failures never reach the chat request path; they are
//! visible only in the operator log stream.

pub mod backoff;
pub mod error;
pub mod firehose;
pub mod pipeline;
pub mod record;
pub mod shutdown;
pub mod stream;
pub mod transport;
