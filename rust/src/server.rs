//! Transport-agnostic MCP request routing.
//!
//! Each gateway hands raw JSON-RPC messages to [`McpServer`] together with
//! whatever credential its transport carried, and writes back the response.

use serde_json::{json, Value};

use crate::dispatch::Dispatcher;
use crate::protocol::{
    InitializeParams, InitializeResult, JsonRpcError, JsonRpcId, JsonRpcRequest, JsonRpcResponse,
    ServerCapabilities, ServerInfo, ToolCallParams, ToolsCapability, ToolsListResult,
    DEFAULT_PROTOCOL_VERSION, JSONRPC_VERSION, SUPPORTED_PROTOCOL_VERSIONS,
};

pub const SERVER_NAME: &str = "Interzoid Data Quality APIs";

#[derive(Debug, Clone)]
pub struct McpServer {
    dispatcher: Dispatcher,
}

impl McpServer {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Handles one raw line/body. Returns `None` when no reply is due.
    pub async fn handle_message(
        &self,
        raw: &str,
        credential: Option<&str>,
    ) -> Option<JsonRpcResponse> {
        let value = match serde_json::from_str::<Value>(raw) {
            Ok(value) => value,
            Err(err) => {
                tracing::error!("Invalid JSON-RPC message: {err}");
                return Some(JsonRpcResponse::parse_error(&err.to_string()));
            }
        };
        self.handle_value(value, credential).await
    }

    pub async fn handle_value(
        &self,
        value: Value,
        credential: Option<&str>,
    ) -> Option<JsonRpcResponse> {
        if is_client_response(&value) {
            tracing::debug!("Ignoring JSON-RPC response from client");
            return None;
        }

        let id = recover_id(&value);
        let request = match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => request,
            Err(err) => {
                return Some(JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_request(format!("Invalid request: {err}")),
                ));
            }
        };
        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(
                request.id,
                JsonRpcError::invalid_request(format!(
                    "Unsupported jsonrpc version: {}",
                    request.jsonrpc
                )),
            ));
        }

        self.handle_request(request, credential).await
    }

    pub async fn handle_request(
        &self,
        request: JsonRpcRequest,
        credential: Option<&str>,
    ) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            self.handle_notification(&request);
            return None;
        }

        tracing::debug!("<- {} (id={:?})", request.method, request.id);
        let id = request.id.clone();
        let result = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.params),
            "ping" => Ok(json!({})),
            "tools/list" => self.handle_tools_list(),
            "tools/call" => self.handle_tools_call(request.params, credential).await,
            method => Err(JsonRpcError::method_not_found(method)),
        };

        Some(match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(error) => {
                tracing::debug!("-> error: {error}");
                JsonRpcResponse::error(id, error)
            }
        })
    }

    fn handle_notification(&self, request: &JsonRpcRequest) {
        match request.method.as_str() {
            "notifications/initialized" => tracing::info!("Client initialized"),
            "notifications/cancelled" => tracing::debug!("Client cancelled a request"),
            method => tracing::debug!("Unhandled notification: {method}"),
        }
    }

    fn handle_initialize(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let requested = params
            .and_then(|params| serde_json::from_value::<InitializeParams>(params).ok())
            .and_then(|params| params.protocol_version);
        let protocol_version = negotiate_protocol_version(requested.as_deref());

        let result = InitializeResult {
            protocol_version: protocol_version.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };
        serde_json::to_value(result).map_err(|err| JsonRpcError::internal(err.to_string()))
    }

    fn handle_tools_list(&self) -> Result<Value, JsonRpcError> {
        let result = ToolsListResult {
            tools: self.dispatcher.catalog().tool_infos(),
        };
        serde_json::to_value(result).map_err(|err| JsonRpcError::internal(err.to_string()))
    }

    async fn handle_tools_call(
        &self,
        params: Option<Value>,
        credential: Option<&str>,
    ) -> Result<Value, JsonRpcError> {
        let params = params.ok_or_else(|| JsonRpcError::invalid_params("Missing params"))?;
        let call: ToolCallParams = serde_json::from_value(params)
            .map_err(|err| JsonRpcError::invalid_params(format!("Invalid params: {err}")))?;

        let result = self
            .dispatcher
            .dispatch(&call.name, call.arguments.as_ref(), credential)
            .await
            .map_err(|err| JsonRpcError::invalid_params(err.to_string()))?;

        serde_json::to_value(result).map_err(|err| JsonRpcError::internal(err.to_string()))
    }
}

fn negotiate_protocol_version(requested: Option<&str>) -> &'static str {
    requested
        .and_then(|requested| {
            SUPPORTED_PROTOCOL_VERSIONS
                .iter()
                .copied()
                .find(|supported| *supported == requested)
        })
        .unwrap_or(DEFAULT_PROTOCOL_VERSION)
}

fn is_client_response(value: &Value) -> bool {
    value.get("method").is_none()
        && value.get("id").is_some()
        && (value.get("result").is_some() || value.get("error").is_some())
}

fn recover_id(value: &Value) -> Option<JsonRpcId> {
    value
        .get("id")
        .cloned()
        .and_then(|id| serde_json::from_value(id).ok())
}
