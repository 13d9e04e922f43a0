use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::catalog::ToolDescriptor;
use crate::error::CallError;

/// Validated query parameters keyed by remote name, sorted for stable URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutboundParams(BTreeMap<String, String>);

impl OutboundParams {
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self(pairs.into_iter().collect())
    }

    pub fn get(&self, remote_name: &str) -> Option<&str> {
        self.0.get(remote_name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Checks caller arguments against `tool` and maps them onto remote names.
///
/// Required parameters must be present and string-typed. Optional parameters
/// are kept only when they are non-empty strings; anything else is dropped.
pub fn validate_arguments(
    tool: &ToolDescriptor,
    arguments: &Map<String, Value>,
) -> Result<OutboundParams, CallError> {
    let mut params = BTreeMap::new();

    for param in &tool.required {
        let Some(raw) = arguments.get(param.caller_name) else {
            return Err(CallError::MissingParameter(param.caller_name.to_string()));
        };
        let Some(value) = raw.as_str() else {
            return Err(CallError::InvalidParameterType(
                param.caller_name.to_string(),
            ));
        };
        params.insert(param.remote_name.to_string(), value.to_string());
    }

    for param in &tool.optional {
        match arguments.get(param.caller_name) {
            Some(Value::String(value)) if !value.is_empty() => {
                params.insert(param.remote_name.to_string(), value.clone());
            }
            Some(Value::String(_)) | None => {}
            Some(other) => {
                tracing::debug!(
                    "Dropping optional parameter {} for {}: expected string, got {}",
                    param.caller_name,
                    tool.name,
                    json_type_name(other)
                );
            }
        }
    }

    Ok(OutboundParams(params))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
