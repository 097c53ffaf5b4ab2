use tracing::{info, warn};

use crate::core::error::AppError;
use crate::core::llm::errors::{GatewayError, error_records};
use crate::core::llm::{ChatGateway, ChatMessage, ChatReply, Role};

/// Used by `/send_llm` when the form names no model.
pub const FALLBACK_MODEL: &str = "gpt-3.5-turbo";

/// Models served by inference endpoints that reject multi-turn history.
pub const SINGLE_TURN_MODELS: [&str; 4] = ["dbrx", "firefunction-v1", "firellava-13b", "hermes-2-pro"];

pub const EMPTY_REPLY_MESSAGE: &str = "Something went wrong please try again later.";

fn gateway_failure(model: &str, err: &GatewayError) -> Vec<ChatReply> {
    match err.code() {
        Some(code) => warn!("Gateway call for model {} failed (code {}): {}", model, code, err),
        None => warn!("Gateway call for model {} failed: {}", model, err),
    }
    error_records(err)
}

/// Chat with the mind bound to the caller's session.
pub async fn send_to_agent(
    gateway: &dyn ChatGateway,
    mind_name: Option<&str>,
    message: &str,
) -> Result<Vec<ChatReply>, AppError> {
    let mind_name = mind_name.ok_or(AppError::NoAgentBound)?;
    let messages = [ChatMessage::user(message)];

    match gateway.complete(mind_name, &messages).await {
        Ok(completion) if completion.content.is_empty() => {
            warn!("Mind {} returned an empty reply", mind_name);
            Ok(vec![completion.into_reply(
                Role::Error,
                EMPTY_REPLY_MESSAGE.to_string(),
            )])
        }
        Ok(mut completion) => {
            let content = std::mem::take(&mut completion.content);
            Ok(vec![completion.into_reply(Role::Assistant, content)])
        }
        Err(e) => Ok(gateway_failure(mind_name, &e)),
    }
}

/// Resolve the conversation sent for a free-model chat. `history` replaces
/// the single new message unless the model only supports single turns.
pub fn conversation_for(
    model: &str,
    message: &str,
    history: Option<&str>,
) -> Result<Vec<ChatMessage>, AppError> {
    match history.filter(|h| !h.is_empty()) {
        Some(raw) if !SINGLE_TURN_MODELS.contains(&model) => serde_json::from_str(raw)
            .map_err(|e| AppError::validation(format!("history is not a valid conversation: {}", e))),
        _ => Ok(vec![ChatMessage::user(message)]),
    }
}

/// Chat with an arbitrary gateway model.
pub async fn send_to_model(
    gateway: &dyn ChatGateway,
    model: Option<&str>,
    message: &str,
    history: Option<&str>,
) -> Result<Vec<ChatReply>, AppError> {
    let model = model.filter(|m| !m.is_empty()).unwrap_or(FALLBACK_MODEL);
    info!("Completing request using model: {}", model);

    let messages = conversation_for(model, message, history)?;

    match gateway.complete(model, &messages).await {
        Ok(mut completion) => {
            let content = std::mem::take(&mut completion.content);
            Ok(vec![completion.into_reply(Role::Assistant, content)])
        }
        Err(e) => Ok(gateway_failure(model, &e)),
    }
}

pub async fn list_models(gateway: &dyn ChatGateway) -> Result<Vec<String>, AppError> {
    gateway.list_models().await.map_err(|e| {
        warn!("Model listing failed (code {:?}): {}", e.code(), e);
        AppError::Gateway(e)
    })
}
