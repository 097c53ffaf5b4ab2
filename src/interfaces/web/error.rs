use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::core::error::AppError;
use crate::core::llm::ChatReply;
use crate::core::llm::errors::message_for_code;

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::UnknownConnector(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::NoAgentBound => StatusCode::BAD_REQUEST,
            AppError::Provisioning(_) | AppError::Gateway(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Text safe to show in the browser.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Gateway(e) => e
                .code()
                .and_then(message_for_code)
                .unwrap_or("The LLM gateway is unavailable. Please try again later.")
                .to_string(),
            AppError::Provisioning(_) => {
                "Could not create the mind. Please check your connection details and API key."
                    .to_string()
            }
            other => other.to_string(),
        }
    }
}

/// JSON routes answer with the same record list a successful call returns.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        warn!("Request failed: {}", self);
        (self.status(), Json(vec![ChatReply::error(self.user_message())])).into_response()
    }
}
