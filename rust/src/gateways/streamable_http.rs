use std::collections::BTreeSet;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use uuid::Uuid;

use crate::config::{Config, CorsConfig};
use crate::credential::credential_from_authorization;
use crate::protocol::{JsonRpcError, JsonRpcResponse};
use crate::server::McpServer;
use crate::support::signals::shutdown_signal;

pub const SESSION_HEADER: &str = "mcp-session-id";

#[derive(Clone)]
struct HttpState {
    server: Arc<McpServer>,
}

pub async fn run(server: McpServer, config: &Config) -> Result<(), String> {
    tracing::info!("  - transport: streamable-http");
    tracing::info!("  - port: {}", config.port);
    tracing::info!("  - streamableHttpPath: {}", config.streamable_http_path);
    if !config.health_endpoints.is_empty() {
        tracing::info!("  - healthEndpoints: {}", config.health_endpoints.join(", "));
    }
    tracing::info!("  - cors: {}", describe_cors(&config.cors));

    let app = build_router(
        server,
        &config.streamable_http_path,
        &config.health_endpoints,
        &config.cors,
    )?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| format!("Failed to bind {addr}: {err}"))?;
    tracing::info!(
        "Listening on port {} (http://localhost:{}{})",
        config.port,
        config.port,
        config.streamable_http_path
    );

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            let name = shutdown_signal().await;
            tracing::info!("Caught {name}. Shutting down...");
        })
        .await
        .map_err(|err| format!("HTTP server error: {err}"))
}

pub fn build_router(
    server: McpServer,
    path: &str,
    health_endpoints: &[String],
    cors: &CorsConfig,
) -> Result<Router, String> {
    let state = HttpState {
        server: Arc::new(server),
    };

    let mut router = Router::new().route(
        path,
        post(handle_post)
            .get(method_not_allowed)
            .delete(method_not_allowed),
    );

    let mut seen = BTreeSet::from([path.to_string()]);
    for endpoint in health_endpoints {
        let endpoint = if endpoint.starts_with('/') {
            endpoint.clone()
        } else {
            format!("/{endpoint}")
        };
        if !seen.insert(endpoint.clone()) {
            return Err(format!(
                "healthEndpoint {endpoint} collides with another route"
            ));
        }
        router = router.route(&endpoint, get(|| async { "ok" }));
    }

    let mut router = router.with_state(state);
    if let Some(layer) = cors_layer(cors)? {
        router = router.layer(layer);
    }
    Ok(router)
}

async fn handle_post(State(state): State<HttpState>, headers: HeaderMap, body: String) -> Response {
    let credential = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(credential_from_authorization);

    let message = match serde_json::from_str::<Value>(&body) {
        Ok(message) => message,
        Err(err) => {
            tracing::error!("Invalid JSON-RPC body: {err}");
            return (
                StatusCode::BAD_REQUEST,
                Json(JsonRpcResponse::parse_error(&err.to_string())),
            )
                .into_response();
        }
    };
    let is_initialize = message.get("method").and_then(Value::as_str) == Some("initialize");

    let Some(reply) = state
        .server
        .handle_value(message, credential.as_deref())
        .await
    else {
        return StatusCode::ACCEPTED.into_response();
    };

    let issue_session = is_initialize && reply.error.is_none();
    let mut response = Json(reply).into_response();
    if issue_session {
        if let Ok(value) = HeaderValue::from_str(&Uuid::new_v4().to_string()) {
            response.headers_mut().insert(SESSION_HEADER, value);
        }
    }
    response
}

async fn method_not_allowed() -> Response {
    let body = JsonRpcResponse::error(
        None,
        JsonRpcError::new(-32000, "Method not allowed; POST JSON-RPC messages instead"),
    );
    (StatusCode::METHOD_NOT_ALLOWED, Json(body)).into_response()
}

fn cors_layer(cors: &CorsConfig) -> Result<Option<CorsLayer>, String> {
    let origin = match cors {
        CorsConfig::Disabled => return Ok(None),
        CorsConfig::AllowAll => AllowOrigin::from(Any),
        CorsConfig::AllowList { raw } => {
            let origins = raw
                .iter()
                .map(|origin| {
                    HeaderValue::from_str(origin)
                        .map_err(|err| format!("Invalid CORS origin '{origin}': {err}"))
                })
                .collect::<Result<Vec<_>, _>>()?;
            AllowOrigin::list(origins)
        }
    };

    Ok(Some(
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::POST, Method::OPTIONS])
            .allow_headers(Any)
            .expose_headers([HeaderName::from_static(SESSION_HEADER)]),
    ))
}

fn describe_cors(cors: &CorsConfig) -> String {
    match cors {
        CorsConfig::Disabled => "disabled".to_string(),
        CorsConfig::AllowAll => "*".to_string(),
        CorsConfig::AllowList { raw } => raw.join(", "),
    }
}
