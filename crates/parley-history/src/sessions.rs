use aws_sdk_s3::Client;
use tracing::{info, warn};
use uuid::Uuid;

use parley_core::models::session::ChatSession;
use parley_core::storage_keys;

use crate::error::HistoryError;
use crate::objects;

/// Default cap on sessions returned by [`list_sessions`], matching the
/// history viewer.
pub const DEFAULT_LIST_LIMIT: usize = 50;

/// Persist a session. Returns an error the caller is expected to log and
/// swallow — the chat response must not depend on the history store.
pub async fn save_session(
    client: &Client,
    bucket: &str,
    session: &ChatSession,
) -> Result<(), HistoryError> {
    let key = storage_keys::session(session.id);
    let body = serde_json::to_vec(session)?;
    objects::put_object(client, bucket, &key, body).await?;
    info!(session_id = %session.id, messages = session.messages.len(), "session saved");
    Ok(())
}

/// Load one session by id.
pub async fn load_session(
    client: &Client,
    bucket: &str,
    id: Uuid,
) -> Result<ChatSession, HistoryError> {
    let key = storage_keys::session(id);
    let body = objects::get_object(client, bucket, &key).await?;
    let session: ChatSession = serde_json::from_slice(&body)?;
    Ok(session)
}

/// List recent sessions, newest first, capped at `limit`.
///
/// Sessions that fail to parse are skipped with a warning rather than
/// failing the whole listing.
pub async fn list_sessions(
    client: &Client,
    bucket: &str,
    limit: usize,
) -> Result<Vec<ChatSession>, HistoryError> {
    let mut metas =
        objects::list_objects_with_metadata(client, bucket, storage_keys::SESSIONS_PREFIX).await?;
    metas.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
    metas.truncate(limit);

    let mut sessions = Vec::with_capacity(metas.len());
    for meta in &metas {
        let body = objects::get_object(client, bucket, &meta.key).await?;
        match serde_json::from_slice::<ChatSession>(&body) {
            Ok(session) => sessions.push(session),
            Err(e) => {
                warn!(key = %meta.key, error = %e, "skipping unparseable session");
            }
        }
    }

    Ok(sessions)
}
