use thiserror::Error;

use super::ChatReply;

pub const MODEL_NOT_FOUND: &str =
    "Model not found. Please use one of our supported models https://docs.mdb.ai/docs/models";
pub const INVALID_API_KEY: &str =
    "Invalid MindsDB API Key, please verify your API key and update your .env file.";
pub const RATE_LIMITED: &str = "You have reached your message limit of 10 requests per minute per IP and, at most, 4 requests per IP in a 10-second period.  Please refer to the documentation for more details or contact us to raise your request limit.";
pub const INTERNAL_ERROR: &str = "Internal system error. Please try again later.";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("gateway returned HTTP {code}: {body}")]
    Status { code: u16, body: String },

    #[error("gateway request failed: {0}")]
    Transport(String),
}

impl GatewayError {
    pub fn code(&self) -> Option<u16> {
        match self {
            GatewayError::Status { code, .. } => Some(*code),
            GatewayError::Transport(_) => None,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => GatewayError::Status {
                code: status.as_u16(),
                body: e.to_string(),
            },
            None => GatewayError::Transport(e.to_string()),
        }
    }
}

/// User-facing text for a gateway status code.
///
/// Unmapped codes (and transport failures, which carry none) produce no text,
/// so callers see an empty record list.
pub fn message_for_code(code: u16) -> Option<&'static str> {
    match code {
        400 => Some(MODEL_NOT_FOUND),
        401 => Some(INVALID_API_KEY),
        429 => Some(RATE_LIMITED),
        500 => Some(INTERNAL_ERROR),
        _ => None,
    }
}

pub fn error_records(err: &GatewayError) -> Vec<ChatReply> {
    err.code()
        .and_then(message_for_code)
        .map(ChatReply::error)
        .into_iter()
        .collect()
}
