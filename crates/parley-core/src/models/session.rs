use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::chat::ChatRole;

/// A persisted chat session between a user and a serving endpoint.
///
/// Uploaded to S3 after every call/response pair so the conversation
/// is durable and can be replayed in the history view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: Uuid,
    pub model_id: String,
    pub messages: Vec<SessionMessage>,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

/// A single message in a persisted chat session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMessage {
    pub role: ChatRole,
    pub content: String,
    pub timestamp: jiff::Timestamp,
}

impl ChatSession {
    /// Create an empty session for the given model.
    pub fn new(model_id: impl Into<String>) -> Self {
        let now = jiff::Timestamp::now();
        Self {
            id: Uuid::new_v4(),
            model_id: model_id.into(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Append one message and bump `updated_at`.
    pub fn push(&mut self, role: ChatRole, content: impl Into<String>) {
        let now = jiff::Timestamp::now();
        self.messages.push(SessionMessage {
            role,
            content: content.into(),
            timestamp: now,
        });
        self.updated_at = now;
    }
}
