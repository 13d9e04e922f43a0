use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::{LogLevel, ServeTransport};

/// Default filter directive for a configured level. `RUST_LOG` wins when set.
pub fn level_directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Debug => "interzoid_mcp=debug,info",
        LogLevel::Info => "info",
        LogLevel::None => "off",
    }
}

/// Installs the global subscriber. Logs always go to stderr: stdout carries
/// protocol frames in stdio mode.
pub fn init_telemetry(level: LogLevel, transport: ServeTransport) -> bool {
    let filter = match std::env::var("RUST_LOG") {
        Ok(raw) if !raw.trim().is_empty() && level != LogLevel::None => {
            EnvFilter::try_new(raw).unwrap_or_else(|_| EnvFilter::new(level_directive(level)))
        }
        _ => EnvFilter::new(level_directive(level)),
    };

    let layer = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter);

    let installed = tracing_subscriber::registry().with(layer).try_init().is_ok();
    if installed {
        tracing::debug!("telemetry initialized for {} transport", transport.as_str());
    }
    installed
}
