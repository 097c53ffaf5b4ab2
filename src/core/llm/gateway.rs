use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::errors::GatewayError;
use super::{ChatGateway, ChatMessage, Completion, Usage};

// ── OpenAI-compatible request/response ──

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
    #[serde(default)]
    model: String,
    #[serde(default)]
    usage: Usage,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ModelList {
    data: Vec<ModelEntry>,
}

#[derive(Deserialize)]
struct ModelEntry {
    id: String,
}

// ── HTTP gateway ──

/// Chat-completions and model-catalog client for the hosted gateway.
pub struct HttpGateway {
    base_url: String,
    api_key: String,
    client: Client,
}

impl HttpGateway {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client,
        }
    }

    async fn check(res: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }
        Err(GatewayError::Status {
            code: status.as_u16(),
            body: res.text().await.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl ChatGateway for HttpGateway {
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<Completion, GatewayError> {
        let req = CompletionRequest {
            model,
            messages,
            stream: false,
        };

        let res = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .await?;
        let parsed: CompletionResponse = Self::check(res).await?.json().await?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        Ok(Completion {
            content,
            model: parsed.model,
            usage: parsed.usage,
        })
    }

    async fn list_models(&self) -> Result<Vec<String>, GatewayError> {
        let res = self
            .client
            .get(format!("{}/models", self.base_url))
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        let parsed: ModelList = Self::check(res).await?.json().await?;
        Ok(parsed.data.into_iter().map(|m| m.id).collect())
    }
}
