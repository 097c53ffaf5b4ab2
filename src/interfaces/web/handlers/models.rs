use axum::{Json, extract::State};

use super::super::AppState;
use crate::core::chat;
use crate::core::error::AppError;

pub async fn models_endpoint(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(chat::list_models(state.gateway.as_ref()).await?))
}
