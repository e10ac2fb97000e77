//! Tool descriptor types and raw bridge translation.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use thiserror::Error;

/// Schema for a tool exposed by the bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Map<String, Value>,
}

/// Schema used when the bridge does not describe a tool's arguments.
pub fn default_input_schema() -> Map<String, Value> {
    match json!({ "type": "object", "properties": {} }) {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Why a raw bridge tool object could not be translated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    #[error("tool entry is not a JSON object")]
    NotAnObject,
    #[error("tool entry has no string `name`")]
    MissingName,
    #[error("tool field `{0}` has the wrong type")]
    InvalidField(&'static str),
}

impl ToolDescriptor {
    /// Translate one raw bridge tool object.
    ///
    /// `description` defaults to `""` and `inputSchema` to an empty object
    /// schema when absent or null.
    pub fn from_raw(raw: &Value) -> Result<Self, TranslationError> {
        let obj = raw.as_object().ok_or(TranslationError::NotAnObject)?;

        let name = obj
            .get("name")
            .and_then(Value::as_str)
            .ok_or(TranslationError::MissingName)?
            .to_string();

        let description = match obj.get("description") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(_) => return Err(TranslationError::InvalidField("description")),
        };

        let input_schema = match obj.get("inputSchema") {
            None | Some(Value::Null) => default_input_schema(),
            Some(Value::Object(schema)) => schema.clone(),
            Some(_) => return Err(TranslationError::InvalidField("inputSchema")),
        };

        Ok(Self {
            name,
            description,
            input_schema,
        })
    }
}

/// Translate a whole catalog, preserving order. Any bad entry fails the batch.
pub fn translate_tools(raw: &[Value]) -> Result<Vec<ToolDescriptor>, TranslationError> {
    raw.iter().map(ToolDescriptor::from_raw).collect()
}
