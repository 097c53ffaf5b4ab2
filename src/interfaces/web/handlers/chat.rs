use axum::{Form, Json, extract::State};

use super::super::AppState;
use super::super::session::Session;
use crate::core::chat;
use crate::core::error::AppError;
use crate::core::llm::ChatReply;

#[derive(serde::Deserialize)]
pub struct SendRequest {
    message: String,
}

pub async fn send_endpoint(
    State(state): State<AppState>,
    session: Session,
    Form(payload): Form<SendRequest>,
) -> Result<Json<Vec<ChatReply>>, AppError> {
    let replies = chat::send_to_agent(
        state.gateway.as_ref(),
        session.mind_name.as_deref(),
        &payload.message,
    )
    .await?;
    Ok(Json(replies))
}

#[derive(serde::Deserialize)]
pub struct SendLlmRequest {
    message: String,
    #[serde(default)]
    history: Option<String>,
    #[serde(default)]
    model: Option<String>,
}

pub async fn send_llm_endpoint(
    State(state): State<AppState>,
    Form(payload): Form<SendLlmRequest>,
) -> Result<Json<Vec<ChatReply>>, AppError> {
    let replies = chat::send_to_model(
        state.gateway.as_ref(),
        payload.model.as_deref(),
        &payload.message,
        payload.history.as_deref(),
    )
    .await?;
    Ok(Json(replies))
}
