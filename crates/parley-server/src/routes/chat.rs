use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use parley_core::models::chat::{ChatMessage, ChatRole};
use parley_core::models::session::ChatSession;
use parley_history::error::HistoryError;
use parley_serving::chat::send_chat;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Continue an existing session, or omit to start a new one.
    pub session_id: Option<Uuid>,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub session_id: Uuid,
    pub reply: String,
    pub latency_ms: u64,
}

/// One chat turn: invoke the serving endpoint with the session history,
/// then emit telemetry and persist the session best-effort. Neither
/// telemetry nor persistence failures reach the user-facing response.
pub async fn post_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    if request.message.trim().is_empty() {
        return Err(ApiError::BadRequest("message must not be empty".to_string()));
    }

    let mut session = match request.session_id {
        Some(id) => {
            match parley_history::sessions::load_session(&state.s3, &state.bucket, id).await {
                Ok(session) => session,
                Err(HistoryError::NotFound { .. }) => {
                    return Err(ApiError::NotFound(format!("session not found: {id}")));
                }
                Err(e) => {
                    // History is best-effort; continue with a fresh session.
                    warn!(session_id = %id, error = %e, "failed to load session");
                    ChatSession::new(&state.model_id)
                }
            }
        }
        None => ChatSession::new(&state.model_id),
    };

    session.push(ChatRole::User, request.message.clone());

    let messages: Vec<ChatMessage> = session
        .messages
        .iter()
        .map(|m| ChatMessage {
            role: m.role,
            content: m.content.clone(),
        })
        .collect();

    let reply = send_chat(&state.bedrock, &state.model_id, &state.system_prompt, &messages).await?;

    session.push(ChatRole::Assistant, reply.content.clone());

    state
        .telemetry
        .clone()
        .track_interaction(&request.message, &reply.content, reply.latency_ms);

    if let Err(e) = parley_history::sessions::save_session(&state.s3, &state.bucket, &session).await
    {
        warn!(session_id = %session.id, error = %e, "failed to persist session");
    }

    Ok(Json(ChatResponse {
        session_id: session.id,
        reply: reply.content,
        latency_ms: reply.latency_ms,
    }))
}
