//! S3 key/path conventions.
//!
//! Pure string functions — no AWS SDK dependency. These define the canonical
//! layout of objects in the Parley S3 bucket.

use uuid::Uuid;

pub fn session(id: Uuid) -> String {
    format!("sessions/{id}.json")
}

pub const SESSIONS_PREFIX: &str = "sessions/";
