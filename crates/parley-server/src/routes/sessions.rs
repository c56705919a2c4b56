use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;
use uuid::Uuid;

use parley_core::models::chat::ChatRole;
use parley_core::models::session::ChatSession;
use parley_history::sessions::{self, DEFAULT_LIST_LIMIT};

use crate::error::ApiError;
use crate::state::AppState;

/// One line in the session list, mirroring the history sidebar.
#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub id: Uuid,
    pub preview: String,
    pub messages: usize,
    pub updated_at: jiff::Timestamp,
}

pub async fn list_sessions(
    State(state): State<AppState>,
) -> Result<Json<Vec<SessionSummary>>, ApiError> {
    let sessions =
        sessions::list_sessions(&state.s3, &state.bucket, DEFAULT_LIST_LIMIT).await?;

    let summaries = sessions
        .iter()
        .map(|s| SessionSummary {
            id: s.id,
            preview: preview(s),
            messages: s.messages.len(),
            updated_at: s.updated_at,
        })
        .collect();

    Ok(Json(summaries))
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ChatSession>, ApiError> {
    let session = sessions::load_session(&state.s3, &state.bucket, id).await?;
    Ok(Json(session))
}

/// First user message, truncated to 50 chars for the list view.
fn preview(session: &ChatSession) -> String {
    let first = session
        .messages
        .iter()
        .find(|m| m.role == ChatRole::User)
        .map(|m| m.content.as_str())
        .unwrap_or("");

    if first.chars().count() > 50 {
        let cut: String = first.chars().take(50).collect();
        format!("{cut}...")
    } else {
        first.to_string()
    }
}
