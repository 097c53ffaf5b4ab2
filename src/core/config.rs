use std::env;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://llm.mdb.ai";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Please create a .env file and add your MindsDB API Key")]
    MissingApiKey,

    #[error("invalid MINDSDB_API_URL {0:?}: {1}")]
    InvalidUrl(String, url::ParseError),

    #[error("invalid MINDGATE_PORT {0:?}")]
    InvalidPort(String),
}

#[derive(Clone)]
pub struct AppConfig {
    /// Key for both the chat gateway and mind creation.
    pub api_key: String,
    /// Gateway base URL without a trailing slash.
    pub api_url: String,
    /// HMAC key for the session cookie.
    pub secret_key: Vec<u8>,
    pub host: String,
    pub port: u16,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"[REDACTED]")
            .field("api_url", &self.api_url)
            .field("secret_key", &"[REDACTED]")
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("MINDSDB_API_KEY")
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let raw_url = lookup("MINDSDB_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = normalize_base_url(&raw_url)?;

        // Without SECRET_KEY, sessions do not survive a restart.
        let secret_key = match lookup("SECRET_KEY").filter(|s| !s.is_empty()) {
            Some(secret) => secret.into_bytes(),
            None => rand::random::<[u8; 24]>().to_vec(),
        };

        let host = lookup("MINDGATE_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("MINDGATE_PORT") {
            Some(p) => p.parse().map_err(|_| ConfigError::InvalidPort(p))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            api_key,
            api_url,
            secret_key,
            host,
            port,
        })
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    url::Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(raw.to_string(), e))?;
    Ok(raw.strip_suffix('/').unwrap_or(raw).to_string())
}
