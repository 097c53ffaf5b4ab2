pub mod errors;
pub mod gateway;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use errors::GatewayError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

/// Client-facing record returned by the chat routes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatReply {
    pub role: Role,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl ChatReply {
    pub fn error(content: impl Into<String>) -> Self {
        Self {
            role: Role::Error,
            content: content.into(),
            model: None,
            usage: None,
        }
    }
}

/// First choice of a chat completion, plus the bookkeeping the gateway reports.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub content: String,
    pub model: String,
    pub usage: Usage,
}

impl Completion {
    pub fn into_reply(self, role: Role, content: String) -> ChatReply {
        ChatReply {
            role,
            content,
            model: Some(self.model),
            usage: Some(self.usage),
        }
    }
}

#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Run a non-streaming chat completion. `model` may be a mind name.
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<Completion, GatewayError>;

    /// Model identifiers in catalog order.
    async fn list_models(&self) -> Result<Vec<String>, GatewayError>;
}
