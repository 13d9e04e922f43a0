use std::sync::Arc;

use interzoid_mcp::catalog::ToolCatalog;
use interzoid_mcp::config::{parse_config, Config, ServeTransport};
use interzoid_mcp::dispatch::Dispatcher;
use interzoid_mcp::executor::RequestExecutor;
use interzoid_mcp::gateways::{stdio, streamable_http};
use interzoid_mcp::server::McpServer;
use interzoid_mcp::support::telemetry::init_telemetry;

#[tokio::main]
async fn main() {
    let config = match parse_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("[interzoid-mcp] Error: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(config).await {
        eprintln!("[interzoid-mcp] Error: {err}");
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), String> {
    init_telemetry(config.log_level, config.transport);
    tracing::info!("Starting interzoid-mcp v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("  - apiBaseUrl: {}", config.api_base_url);
    if config.api_key.is_some() {
        tracing::info!("  - credential: {} is set", interzoid_mcp::config::API_KEY_ENV);
    } else {
        tracing::info!("  - credential: none (paid calls return x402 payment requirements)");
    }

    let catalog = ToolCatalog::interzoid().map_err(|err| err.to_string())?;
    tracing::info!("  - tools: {}", catalog.len());

    let executor = RequestExecutor::new(&config.api_base_url)?;
    let dispatcher = Dispatcher::new(Arc::new(catalog), executor, config.api_key.clone());
    let server = McpServer::new(dispatcher);

    match config.transport {
        ServeTransport::Stdio => stdio::run(server).await,
        ServeTransport::StreamableHttp => streamable_http::run(server, &config).await,
    }
}
