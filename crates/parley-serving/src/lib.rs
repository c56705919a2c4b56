//! parley-serving
//!
//! Model endpoint invocation. The serving endpoint is an opaque
//! collaborator: it takes the conversation so far and yields the assistant
//! text plus the wall-clock latency consumed downstream by telemetry.

pub mod chat;
pub mod error;
