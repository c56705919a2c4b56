use std::time::Instant;

use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, Message, SystemContentBlock,
};
use tracing::info;

use parley_core::models::chat::{ChatMessage, ChatRole};

use crate::error::ServingError;

/// The assistant's reply to one chat turn, with the wall-clock latency of
/// the endpoint round trip.
#[derive(Debug, Clone)]
pub struct ChatReply {
    pub content: String,
    pub latency_ms: u64,
}

/// Send a multi-turn conversation to the serving endpoint and return the
/// assistant's reply.
///
/// The caller provides the full message history and a system prompt; the
/// latency measured here feeds the per-turn telemetry record.
pub async fn send_chat(
    client: &Client,
    model_id: &str,
    system_prompt: &str,
    messages: &[ChatMessage],
) -> Result<ChatReply, ServingError> {
    let mut converse_messages: Vec<Message> = Vec::new();

    for msg in messages {
        let role = match msg.role {
            ChatRole::User => ConversationRole::User,
            ChatRole::Assistant => ConversationRole::Assistant,
        };
        let message = Message::builder()
            .role(role)
            .content(ContentBlock::Text(msg.content.clone()))
            .build()
            .map_err(|e| ServingError::Invocation(e.to_string()))?;
        converse_messages.push(message);
    }

    let started = Instant::now();

    let response = client
        .converse()
        .model_id(model_id)
        .system(SystemContentBlock::Text(system_prompt.to_string()))
        .set_messages(Some(converse_messages))
        .send()
        .await
        .map_err(|e| ServingError::Invocation(e.into_service_error().to_string()))?;

    let latency_ms = started.elapsed().as_millis() as u64;

    let output_message = response
        .output()
        .and_then(|o| o.as_message().ok())
        .ok_or_else(|| ServingError::ResponseParse("no message in response".to_string()))?;

    let content = output_message
        .content()
        .iter()
        .filter_map(|block| {
            if let ContentBlock::Text(text) = block {
                Some(text.as_str())
            } else {
                None
            }
        })
        .collect::<Vec<_>>()
        .join("");

    info!(model = model_id, latency_ms, "serving endpoint responded");

    Ok(ChatReply {
        content,
        latency_ms,
    })
}
