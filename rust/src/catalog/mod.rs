mod interzoid;

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde_json::{json, Map, Value};

use crate::protocol::ToolInfo;

pub use interzoid::interzoid_tools;

/// Maps one caller-facing argument onto the query parameter the remote API expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamMapping {
    pub caller_name: &'static str,
    pub remote_name: &'static str,
    pub description: &'static str,
}

pub const fn same(name: &'static str, description: &'static str) -> ParamMapping {
    ParamMapping {
        caller_name: name,
        remote_name: name,
        description,
    }
}

pub const fn mapped(
    caller_name: &'static str,
    remote_name: &'static str,
    description: &'static str,
) -> ParamMapping {
    ParamMapping {
        caller_name,
        remote_name,
        description,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub endpoint: &'static str,
    pub required: Vec<ParamMapping>,
    pub optional: Vec<ParamMapping>,
}

impl ToolDescriptor {
    pub fn new(name: &'static str, description: &'static str, endpoint: &'static str) -> Self {
        Self {
            name,
            description,
            endpoint,
            required: Vec::new(),
            optional: Vec::new(),
        }
    }

    pub fn required(mut self, param: ParamMapping) -> Self {
        self.required.push(param);
        self
    }

    pub fn optional(mut self, param: ParamMapping) -> Self {
        self.optional.push(param);
        self
    }

    /// JSON schema published in `tools/list`. Every argument is a string.
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        for param in self.required.iter().chain(self.optional.iter()) {
            properties.insert(
                param.caller_name.to_string(),
                json!({
                    "type": "string",
                    "description": param.description,
                }),
            );
        }
        let required = self
            .required
            .iter()
            .map(|param| Value::String(param.caller_name.to_string()))
            .collect::<Vec<_>>();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    pub fn tool_info(&self) -> ToolInfo {
        ToolInfo {
            name: self.name.to_string(),
            description: self.description.to_string(),
            input_schema: self.input_schema(),
        }
    }

    fn params(&self) -> impl Iterator<Item = &ParamMapping> {
        self.required.iter().chain(self.optional.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    DuplicateTool(String),
    DuplicateParameter { tool: String, param: String },
    InvalidEndpoint { tool: String, endpoint: String },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateTool(name) => write!(f, "Tool '{name}' is registered more than once"),
            Self::DuplicateParameter { tool, param } => {
                write!(f, "Tool '{tool}' declares parameter '{param}' more than once")
            }
            Self::InvalidEndpoint { tool, endpoint } => {
                write!(f, "Tool '{tool}' has endpoint '{endpoint}' which must start with '/'")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// Read-only, ordered set of tool descriptors, built once before serving.
#[derive(Debug, Clone)]
pub struct ToolCatalog {
    tools: Vec<ToolDescriptor>,
    by_name: HashMap<&'static str, usize>,
}

impl ToolCatalog {
    pub fn new(tools: Vec<ToolDescriptor>) -> Result<Self, CatalogError> {
        let mut by_name = HashMap::with_capacity(tools.len());
        for (index, tool) in tools.iter().enumerate() {
            if !tool.endpoint.starts_with('/') {
                return Err(CatalogError::InvalidEndpoint {
                    tool: tool.name.to_string(),
                    endpoint: tool.endpoint.to_string(),
                });
            }
            let mut seen = HashSet::new();
            for param in tool.params() {
                if !seen.insert(param.caller_name) {
                    return Err(CatalogError::DuplicateParameter {
                        tool: tool.name.to_string(),
                        param: param.caller_name.to_string(),
                    });
                }
            }
            if by_name.insert(tool.name, index).is_some() {
                return Err(CatalogError::DuplicateTool(tool.name.to_string()));
            }
        }
        Ok(Self { tools, by_name })
    }

    pub fn interzoid() -> Result<Self, CatalogError> {
        Self::new(interzoid_tools())
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.by_name.get(name).map(|index| &self.tools[*index])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.iter()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn tool_infos(&self) -> Vec<ToolInfo> {
        self.tools.iter().map(ToolDescriptor::tool_info).collect()
    }
}
