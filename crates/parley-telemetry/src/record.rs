use serde::Serialize;
use uuid::Uuid;

/// Default per-field truncation bound, in bytes.
pub const DEFAULT_TEXT_LIMIT: usize = 10_000;

/// One immutable telemetry record for a single chat turn.
///
/// Constructed after the assistant response is produced, attempted at most
/// `max_attempts` times, then discarded — there is no durable queue behind it.
#[derive(Debug, Clone, Serialize)]
pub struct InteractionRecord {
    pub telemetry_id: Uuid,
    pub user_message: String,
    pub assistant_message: String,
    pub response_time_ms: u64,
}

impl InteractionRecord {
    /// Build a record from raw conversation fields.
    ///
    /// Text fields are truncated to at most `max_len` bytes, keeping the
    /// longest prefix that ends on a char boundary, so oversized input never
    /// fails construction. A fresh `telemetry_id` is generated per call.
    pub fn build(
        user_text: &str,
        assistant_text: &str,
        response_time_ms: u64,
        max_len: usize,
    ) -> Self {
        Self {
            telemetry_id: Uuid::new_v4(),
            user_message: truncate_to_boundary(user_text, max_len).to_string(),
            assistant_message: truncate_to_boundary(assistant_text, max_len).to_string(),
            response_time_ms,
        }
    }
}

/// Longest prefix of `text` that fits in `max_len` bytes without splitting
/// a character.
fn truncate_to_boundary(text: &str, max_len: usize) -> &str {
    if text.len() <= max_len {
        return text;
    }
    let mut end = max_len;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
