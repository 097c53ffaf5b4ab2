use async_trait::async_trait;
use reqwest::Client;
use tracing::warn;

use super::{MindProvisioner, MindSpec};
use crate::core::error::AppError;

/// Creates minds through the gateway's `/minds` endpoint.
pub struct HttpMindClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl HttpMindClient {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client,
        }
    }
}

#[async_trait]
impl MindProvisioner for HttpMindClient {
    async fn create_mind(&self, spec: &MindSpec) -> Result<(), AppError> {
        let res = self
            .client
            .post(format!("{}/minds", self.base_url))
            .bearer_auth(&self.api_key)
            .json(spec)
            .send()
            .await
            .map_err(|e| {
                warn!("Mind creation request for {} failed: {}", spec.name, e);
                AppError::Provisioning(e.to_string())
            })?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            warn!(
                "Mind creation for {} rejected (code {}): {}",
                spec.name,
                status.as_u16(),
                body
            );
            return Err(AppError::Provisioning(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body
            )));
        }
        Ok(())
    }
}
