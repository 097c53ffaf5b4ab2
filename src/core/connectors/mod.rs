use serde::Deserialize;

use crate::core::error::AppError;

const CONNECTORS_JSON: &str = include_str!("connectors.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    String,
    Password,
    Number,
}

impl FieldType {
    /// The `type` attribute used for the rendered `<input>`.
    pub fn input_type(self) -> &'static str {
        match self {
            FieldType::String => "text",
            FieldType::Password => "password",
            FieldType::Number => "number",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldSpec {
    pub key: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub secret: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConnectorDescriptor {
    pub name: String,
    pub fields: Vec<FieldSpec>,
}

/// Static table of database connectors and the fields their forms collect.
/// Field order follows the table and drives the rendered form.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectorRegistry {
    connectors: Vec<ConnectorDescriptor>,
}

impl ConnectorRegistry {
    pub fn load() -> anyhow::Result<Self> {
        Self::from_json(CONNECTORS_JSON)
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let registry: ConnectorRegistry = serde_json::from_str(raw)
            .map_err(|e| anyhow::anyhow!("connectors.json is invalid: {}", e))?;
        Ok(registry)
    }

    pub fn describe(&self, name: &str) -> Result<&ConnectorDescriptor, AppError> {
        self.connectors
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| AppError::UnknownConnector(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.connectors.iter().map(|c| c.name.as_str())
    }
}
