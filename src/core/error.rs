use thiserror::Error;

use crate::core::llm::errors::GatewayError;

/// Failures surfaced by the request handlers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("unknown connector: {0}")]
    UnknownConnector(String),

    #[error("{0}")]
    Validation(String),

    #[error("mind provisioning failed: {0}")]
    Provisioning(String),

    #[error("No mind has been created in this session. Connect a database first.")]
    NoAgentBound,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }
}
