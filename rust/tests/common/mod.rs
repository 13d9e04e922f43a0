#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::process::{Child, Command};
use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;

/// Canned reply for one path on the mock Interzoid API.
#[derive(Debug, Clone)]
pub struct MockRoute {
    pub status: StatusCode,
    pub body: String,
    pub delay: Option<Duration>,
}

impl MockRoute {
    pub fn json(status: StatusCode, body: serde_json::Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn raw(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub raw_query: Option<String>,
    pub query: BTreeMap<String, String>,
    pub api_key: Option<String>,
}

#[derive(Clone)]
struct MockState {
    routes: Arc<HashMap<String, MockRoute>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct MockApi {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl MockApi {
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let _ = self.handle.await;
    }
}

async fn mock_handler(State(state): State<MockState>, uri: Uri, headers: HeaderMap) -> Response {
    let query = uri
        .query()
        .map(|raw| {
            url::form_urlencoded::parse(raw.as_bytes())
                .map(|(key, value)| (key.into_owned(), value.into_owned()))
                .collect()
        })
        .unwrap_or_default();
    state.requests.lock().await.push(RecordedRequest {
        path: uri.path().to_string(),
        raw_query: uri.query().map(str::to_owned),
        query,
        api_key: headers
            .get("x-api-key")
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned),
    });

    let Some(route) = state.routes.get(uri.path()).cloned() else {
        return (StatusCode::NOT_FOUND, "not found").into_response();
    };
    if let Some(delay) = route.delay {
        tokio::time::sleep(delay).await;
    }
    (
        route.status,
        [(header::CONTENT_TYPE, "application/json")],
        route.body,
    )
        .into_response()
}

pub async fn spawn_mock_api(routes: Vec<(&str, MockRoute)>) -> MockApi {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        routes: Arc::new(
            routes
                .into_iter()
                .map(|(path, route)| (path.to_string(), route))
                .collect(),
        ),
        requests: requests.clone(),
    };
    let app = Router::new().fallback(mock_handler).with_state(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0))
        .await
        .expect("failed to bind mock API listener");
    let port = listener
        .local_addr()
        .expect("failed to read mock API address")
        .port();

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(async move {
        let server = axum::serve(listener, app.into_make_service()).with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
        });
        let _ = server.await;
    });

    MockApi {
        base_url: format!("http://127.0.0.1:{port}"),
        requests,
        shutdown: Some(shutdown_tx),
        handle,
    }
}

pub fn find_free_port() -> u16 {
    std::net::TcpListener::bind(("127.0.0.1", 0))
        .expect("failed to bind local test port")
        .local_addr()
        .expect("failed to read local address")
        .port()
}

pub async fn spawn_server(
    args: &[&str],
    envs: &[(&str, &str)],
    pipe_stdin: bool,
    pipe_stdout: bool,
) -> Child {
    let mut cmd = Command::new(server_exe_path());
    cmd.args(args)
        .env_remove("PORT")
        .env_remove("RUST_LOG")
        .env_remove("INTERZOID_API_KEY")
        .envs(envs.iter().copied())
        .stdin(if pipe_stdin {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(if pipe_stdout {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stderr(Stdio::null())
        .kill_on_drop(true);

    cmd.spawn().expect("failed to spawn interzoid-mcp")
}

fn server_exe_path() -> PathBuf {
    if let Some(exe) = option_env!("CARGO_BIN_EXE_interzoid-mcp") {
        return PathBuf::from(exe);
    }

    let current = std::env::current_exe().expect("failed to read current test binary path");
    let target_dir = current
        .parent()
        .and_then(|path| path.parent())
        .expect("failed to derive target/debug directory from test binary path");
    let fallback = target_dir.join(format!("interzoid-mcp{}", std::env::consts::EXE_SUFFIX));
    assert!(
        fallback.exists(),
        "interzoid-mcp binary not found at {}",
        fallback.display()
    );
    fallback
}

pub async fn stop_child(child: &mut Child) {
    match child.try_wait() {
        Ok(Some(_)) => {}
        Ok(None) | Err(_) => {
            let _ = child.kill().await;
            let _ = child.wait().await;
        }
    }
}

pub async fn wait_for_http_status(url: &str, expected: reqwest::StatusCode, timeout: Duration) {
    let client = reqwest::Client::new();
    let deadline = Instant::now() + timeout;
    loop {
        if let Ok(response) = client.get(url).send().await {
            if response.status() == expected {
                return;
            }
        }

        assert!(
            Instant::now() < deadline,
            "timed out waiting for {url} to return status {expected}"
        );

        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}

pub fn initialize_request(id: &str) -> serde_json::Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "initialize",
        "params": {
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": {
                "name": "integration-test",
                "version": "0.1.0"
            }
        }
    })
}

pub fn tool_call_request(id: &str, tool: &str, arguments: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": {
            "name": tool,
            "arguments": arguments
        }
    })
}
