//! In-memory collaborators for handler and client tests.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::core::error::AppError;
use crate::core::llm::errors::GatewayError;
use crate::core::llm::{ChatGateway, ChatMessage, Completion, Usage};
use crate::core::mind::{MindProvisioner, MindSpec};

pub enum FakeReply {
    /// Reply with this content; the reported model echoes the request.
    Content(String),
    Status(u16),
}

pub struct FakeGateway {
    reply: FakeReply,
    models: Vec<String>,
    pub calls: Mutex<Vec<(String, Vec<ChatMessage>)>>,
}

impl FakeGateway {
    pub fn replying(content: &str) -> Self {
        Self::new(FakeReply::Content(content.to_string()))
    }

    pub fn failing(code: u16) -> Self {
        Self::new(FakeReply::Status(code))
    }

    pub fn new(reply: FakeReply) -> Self {
        Self {
            reply,
            models: vec!["gpt-3.5-turbo".to_string(), "dbrx".to_string()],
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, Vec<ChatMessage>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatGateway for FakeGateway {
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<Completion, GatewayError> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), messages.to_vec()));
        match &self.reply {
            FakeReply::Content(content) => Ok(Completion {
                content: content.clone(),
                model: model.to_string(),
                usage: Usage {
                    completion_tokens: 5,
                    prompt_tokens: 7,
                    total_tokens: 12,
                },
            }),
            FakeReply::Status(code) => Err(GatewayError::Status {
                code: *code,
                body: "fake failure".to_string(),
            }),
        }
    }

    async fn list_models(&self) -> Result<Vec<String>, GatewayError> {
        match &self.reply {
            FakeReply::Status(code) => Err(GatewayError::Status {
                code: *code,
                body: "fake failure".to_string(),
            }),
            FakeReply::Content(_) => Ok(self.models.clone()),
        }
    }
}

#[derive(Default)]
pub struct FakeProvisioner {
    pub fail: bool,
    pub created: Mutex<Vec<MindSpec>>,
}

impl FakeProvisioner {
    pub fn failing() -> Self {
        Self {
            fail: true,
            created: Mutex::new(Vec::new()),
        }
    }

    pub fn created(&self) -> Vec<MindSpec> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl MindProvisioner for FakeProvisioner {
    async fn create_mind(&self, spec: &MindSpec) -> Result<(), AppError> {
        if self.fail {
            return Err(AppError::Provisioning("HTTP 401: unauthorized".to_string()));
        }
        self.created.lock().unwrap().push(spec.clone());
        Ok(())
    }
}
