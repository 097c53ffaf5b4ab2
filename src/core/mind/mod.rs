pub mod client;

use async_trait::async_trait;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::info;

use crate::core::connectors::{ConnectorDescriptor, ConnectorRegistry, FieldType};
use crate::core::error::AppError;

/// Model the gateway uses for text-to-SQL inside a mind. Not limited by the
/// models the chat endpoints expose.
pub const MIND_MODEL: &str = "gpt-4";
pub const DATA_SOURCE_TYPE: &str = "postgres";
pub const MIND_DESCRIPTION: &str = "House Sales";
pub const DEMO_SCHEMA: &str = "demo_data";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ArgValue {
    Int(i64),
    Text(String),
}

pub type ConnectionArgs = BTreeMap<String, ArgValue>;

/// Payload for the mind-creation API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MindSpec {
    pub name: String,
    pub model: String,
    pub data_source_type: String,
    pub data_source_connection_args: ConnectionArgs,
    pub description: String,
}

#[async_trait]
pub trait MindProvisioner: Send + Sync {
    async fn create_mind(&self, spec: &MindSpec) -> Result<(), AppError>;
}

/// Coerce submitted form values according to the connector's field table and
/// add the demo schema.
pub fn coerce_connection_args(
    connector: &ConnectorDescriptor,
    raw: &HashMap<String, String>,
) -> Result<ConnectionArgs, AppError> {
    let mut args = ConnectionArgs::new();

    for field in &connector.fields {
        let value = match raw.get(&field.key).filter(|v| !v.is_empty()) {
            Some(v) => v,
            None if field.required => {
                return Err(AppError::validation(format!("{} is required", field.label)));
            }
            None => continue,
        };

        let coerced = match field.field_type {
            FieldType::Number => value
                .trim()
                .parse::<i64>()
                .map(ArgValue::Int)
                .map_err(|_| AppError::validation(format!("{} must be an integer", field.label)))?,
            FieldType::String | FieldType::Password => ArgValue::Text(value.clone()),
        };
        args.insert(field.key.clone(), coerced);
    }

    args.insert("schema".to_string(), ArgValue::Text(DEMO_SCHEMA.to_string()));
    Ok(args)
}

/// Two calls within the same second yield the same name; the gateway rejects
/// the duplicate.
pub fn mind_name(connector: &str, unix_seconds: u64) -> String {
    format!("{}_mind_{}", connector, unix_seconds)
}

pub fn unix_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Validate the submitted connection fields, create a mind bound to them and
/// return its name.
pub async fn provision(
    registry: &ConnectorRegistry,
    provisioner: &dyn MindProvisioner,
    connector: &str,
    raw_fields: &HashMap<String, String>,
    unix_seconds: u64,
) -> Result<String, AppError> {
    let descriptor = registry.describe(connector)?;
    let connection_args = coerce_connection_args(descriptor, raw_fields)?;

    let spec = MindSpec {
        name: mind_name(connector, unix_seconds),
        model: MIND_MODEL.to_string(),
        data_source_type: DATA_SOURCE_TYPE.to_string(),
        data_source_connection_args: connection_args,
        description: MIND_DESCRIPTION.to_string(),
    };

    provisioner.create_mind(&spec).await?;
    info!("Mind successfully created: {}", spec.name);
    Ok(spec.name)
}
