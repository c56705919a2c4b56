//! parley-core
//!
//! Pure domain types and S3 key conventions.
//! No AWS SDK dependency — this is the shared vocabulary of the Parley system.

pub mod models;
pub mod storage_keys;
