mod error;
mod handlers;
mod router;
pub(crate) mod session;

use anyhow::Result;
use axum::extract::FromRef;
use std::sync::Arc;
use tracing::info;

use crate::core::config::AppConfig;
use crate::core::connectors::ConnectorRegistry;
use crate::core::llm::ChatGateway;
use crate::core::llm::gateway::HttpGateway;
use crate::core::mind::MindProvisioner;
use crate::core::mind::client::HttpMindClient;
use session::SessionKey;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) connectors: Arc<ConnectorRegistry>,
    pub(crate) gateway: Arc<dyn ChatGateway>,
    pub(crate) minds: Arc<dyn MindProvisioner>,
    pub(crate) session_key: SessionKey,
}

impl FromRef<AppState> for SessionKey {
    fn from_ref(state: &AppState) -> Self {
        state.session_key.clone()
    }
}

impl AppState {
    /// Wire the HTTP clients for the configured gateway. Both share one
    /// connection pool.
    pub fn from_config(config: &AppConfig, connectors: ConnectorRegistry) -> Self {
        let client = reqwest::Client::new();
        Self {
            connectors: Arc::new(connectors),
            gateway: Arc::new(HttpGateway::new(
                client.clone(),
                config.api_url.clone(),
                config.api_key.clone(),
            )),
            minds: Arc::new(HttpMindClient::new(
                client,
                config.api_url.clone(),
                config.api_key.clone(),
            )),
            session_key: SessionKey::new(&config.secret_key),
        }
    }
}

pub struct WebServer {
    state: AppState,
    host: String,
    port: u16,
}

impl WebServer {
    pub fn new(config: &AppConfig, connectors: ConnectorRegistry) -> Self {
        Self {
            state: AppState::from_config(config, connectors),
            host: config.host.clone(),
            port: config.port,
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub async fn serve(self) -> Result<()> {
        let addr = self.address();
        let app = router::build_router(self.state);

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!("Web Server running at http://{addr}");
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        info!("Web Server shutting down...");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
