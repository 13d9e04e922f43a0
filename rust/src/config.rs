use clap::{Arg, ArgAction, Command, ValueEnum};
use std::env;
use std::fmt;

use crate::executor::{normalize_base_url, DEFAULT_API_BASE_URL};

pub const API_KEY_ENV: &str = "INTERZOID_API_KEY";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_STREAMABLE_HTTP_PATH: &str = "/mcp";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ServeTransport {
    Stdio,
    #[value(alias = "streamableHttp", alias = "http")]
    StreamableHttp,
}

impl ServeTransport {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stdio => "stdio",
            Self::StreamableHttp => "streamable-http",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsConfig {
    Disabled,
    AllowAll,
    AllowList { raw: Vec<String> },
}

#[derive(Clone)]
pub struct Config {
    pub transport: ServeTransport,
    pub port: u16,
    pub streamable_http_path: String,
    pub health_endpoints: Vec<String>,
    pub cors: CorsConfig,
    pub api_base_url: String,
    /// Process-wide credential, read once at startup.
    pub api_key: Option<String>,
    pub log_level: LogLevel,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("transport", &self.transport)
            .field("port", &self.port)
            .field("streamable_http_path", &self.streamable_http_path)
            .field("health_endpoints", &self.health_endpoints)
            .field("cors", &self.cors)
            .field("api_base_url", &self.api_base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("log_level", &self.log_level)
            .finish()
    }
}

/// Environment values consulted during parsing.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub port: Option<String>,
    pub api_key: Option<String>,
}

impl EnvOverrides {
    pub fn from_process() -> Self {
        Self {
            port: env::var("PORT").ok(),
            api_key: env::var(API_KEY_ENV).ok(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort(String),
    InvalidBaseUrl(String),
    InvalidArg(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort(msg) => write!(f, "{msg}"),
            ConfigError::InvalidBaseUrl(msg) => write!(f, "{msg}"),
            ConfigError::InvalidArg(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

pub fn parse_config() -> Result<Config, ConfigError> {
    let raw_args: Vec<String> = env::args().collect();
    parse_config_from(raw_args, EnvOverrides::from_process())
}

pub fn parse_config_from(raw_args: Vec<String>, env: EnvOverrides) -> Result<Config, ConfigError> {
    let cors_input = parse_cors_flags(&raw_args);
    let matches = build_cli().get_matches_from(raw_args);

    let transport = matches
        .get_one::<ServeTransport>("transport")
        .copied()
        .unwrap_or(ServeTransport::Stdio);

    let port = match matches.get_one::<String>("port").cloned().or(env.port) {
        Some(raw) => parse_port(&raw)?,
        None => DEFAULT_PORT,
    };

    let streamable_http_path = normalize_path(
        matches
            .get_one::<String>("streamableHttpPath")
            .map(String::as_str)
            .unwrap_or(DEFAULT_STREAMABLE_HTTP_PATH),
    )?;

    let health_endpoints: Vec<String> = matches
        .get_many::<String>("healthEndpoint")
        .map(|vals| {
            vals.filter(|v| !v.is_empty())
                .map(|v| v.to_string())
                .collect()
        })
        .unwrap_or_default();

    let api_base_url = parse_base_url(
        matches
            .get_one::<String>("apiBaseUrl")
            .map(String::as_str)
            .unwrap_or(DEFAULT_API_BASE_URL),
    )?;

    let log_level = matches
        .get_one::<LogLevel>("logLevel")
        .copied()
        .unwrap_or(LogLevel::Info);

    let cors = if cors_input.present {
        if cors_input.allow_all || cors_input.values.is_empty() {
            CorsConfig::AllowAll
        } else {
            CorsConfig::AllowList {
                raw: cors_input.values,
            }
        }
    } else {
        CorsConfig::Disabled
    };

    let api_key = env
        .api_key
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty());

    Ok(Config {
        transport,
        port,
        streamable_http_path,
        health_endpoints,
        cors,
        api_base_url,
        api_key,
        log_level,
    })
}

fn build_cli() -> Command {
    Command::new("interzoid-mcp")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Serve the Interzoid data-quality APIs as MCP tools")
        .after_help(format!(
            "Set {API_KEY_ENV} to call with your own API key. Without a key, paid calls return x402 payment requirements."
        ))
        .arg(
            Arg::new("transport")
                .long("transport")
                .value_parser(clap::builder::EnumValueParser::<ServeTransport>::new())
                .value_name("stdio|streamableHttp")
                .default_value("stdio"),
        )
        .arg(Arg::new("port").long("port").value_name("PORT"))
        .arg(
            Arg::new("streamableHttpPath")
                .long("streamableHttpPath")
                .value_name("PATH")
                .default_value(DEFAULT_STREAMABLE_HTTP_PATH),
        )
        .arg(
            Arg::new("healthEndpoint")
                .long("healthEndpoint")
                .action(ArgAction::Append)
                .value_name("PATH"),
        )
        .arg(
            Arg::new("cors")
                .long("cors")
                .num_args(0..=1)
                .action(ArgAction::Append)
                .value_name("ORIGIN"),
        )
        .arg(
            Arg::new("apiBaseUrl")
                .long("apiBaseUrl")
                .value_name("URL")
                .default_value(DEFAULT_API_BASE_URL),
        )
        .arg(
            Arg::new("logLevel")
                .long("logLevel")
                .value_parser(clap::builder::EnumValueParser::<LogLevel>::new())
                .default_value("info"),
        )
}

fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    let val: i64 = raw.trim().parse().map_err(|_| {
        ConfigError::InvalidPort(format!("port must be a valid port, received: {raw}"))
    })?;
    if val <= 0 || val > u16::MAX as i64 {
        return Err(ConfigError::InvalidPort(format!(
            "port must be in 1..=65535, received: {raw}"
        )));
    }
    Ok(val as u16)
}

fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    normalize_base_url(raw).map_err(|err| ConfigError::InvalidBaseUrl(format!("apiBaseUrl: {err}")))
}

fn normalize_path(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "/" {
        return Err(ConfigError::InvalidArg(format!(
            "streamableHttpPath must name a route, received: '{raw}'"
        )));
    }
    if trimmed.starts_with('/') {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("/{trimmed}"))
    }
}

#[derive(Default)]
struct CorsInput {
    present: bool,
    allow_all: bool,
    values: Vec<String>,
}

fn parse_cors_flags(args: &[String]) -> CorsInput {
    let mut input = CorsInput::default();
    let mut i = 0;
    while i < args.len() {
        if args[i] == "--cors" {
            input.present = true;
            match args.get(i + 1) {
                Some(next_val) if !next_val.starts_with("--") => {
                    if next_val == "*" {
                        input.allow_all = true;
                    } else {
                        input.values.push(next_val.clone());
                    }
                    i += 1;
                }
                _ => input.allow_all = true,
            }
        }
        i += 1;
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config, ConfigError> {
        parse_env(args, EnvOverrides::default())
    }

    fn parse_env(args: &[&str], env: EnvOverrides) -> Result<Config, ConfigError> {
        parse_config_from(args.iter().map(|arg| arg.to_string()).collect(), env)
    }

    #[test]
    fn defaults_to_stdio_against_interzoid() {
        let cfg = parse(&["interzoid-mcp"]).expect("defaults should parse");
        assert_eq!(cfg.transport, ServeTransport::Stdio);
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.streamable_http_path, "/mcp");
        assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(cfg.api_key, None);
        assert_eq!(cfg.log_level, LogLevel::Info);
        assert_eq!(cfg.cors, CorsConfig::Disabled);
        assert!(cfg.health_endpoints.is_empty());
    }

    #[test]
    fn accepts_streamable_http_aliases() {
        for raw in ["streamableHttp", "streamable-http", "http"] {
            let cfg = parse(&["interzoid-mcp", "--transport", raw]).expect("alias should parse");
            assert_eq!(cfg.transport, ServeTransport::StreamableHttp, "{raw}");
        }
    }

    #[test]
    fn transport_value_enum_rejects_invalid_variant() {
        assert!(ServeTransport::from_str("grpc", true).is_err());
    }

    #[test]
    fn port_flag_beats_env() {
        let env = EnvOverrides {
            port: Some("9100".into()),
            api_key: None,
        };
        let cfg = parse_env(&["interzoid-mcp", "--port", "9200"], env.clone()).expect("parse");
        assert_eq!(cfg.port, 9200);
        let cfg = parse_env(&["interzoid-mcp"], env).expect("parse");
        assert_eq!(cfg.port, 9100);
    }

    #[test]
    fn rejects_invalid_port() {
        let err = parse(&["interzoid-mcp", "--port", "70000"]).expect_err("port out of range");
        assert!(matches!(err, ConfigError::InvalidPort(_)));
        let err = parse(&["interzoid-mcp", "--port", "abc"]).expect_err("non-numeric port");
        assert!(matches!(err, ConfigError::InvalidPort(_)));
    }

    #[test]
    fn api_key_comes_from_env_and_blank_is_absent() {
        let cfg = parse_env(
            &["interzoid-mcp"],
            EnvOverrides {
                port: None,
                api_key: Some(" key-123 ".into()),
            },
        )
        .expect("parse");
        assert_eq!(cfg.api_key.as_deref(), Some("key-123"));

        let cfg = parse_env(
            &["interzoid-mcp"],
            EnvOverrides {
                port: None,
                api_key: Some("   ".into()),
            },
        )
        .expect("parse");
        assert_eq!(cfg.api_key, None);
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let cfg = parse_env(
            &["interzoid-mcp"],
            EnvOverrides {
                port: None,
                api_key: Some("key-123".into()),
            },
        )
        .expect("parse");
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("key-123"));
    }

    #[test]
    fn api_base_url_is_validated_and_trimmed() {
        let cfg = parse(&["interzoid-mcp", "--apiBaseUrl", "http://127.0.0.1:9000/"])
            .expect("local base url");
        assert_eq!(cfg.api_base_url, "http://127.0.0.1:9000");

        let err = parse(&["interzoid-mcp", "--apiBaseUrl", "ftp://example.com"])
            .expect_err("ftp rejected");
        assert!(matches!(err, ConfigError::InvalidBaseUrl(_)));

        let err =
            parse(&["interzoid-mcp", "--apiBaseUrl", "not-a-url"]).expect_err("relative rejected");
        assert!(matches!(err, ConfigError::InvalidBaseUrl(_)));
    }

    #[test]
    fn streamable_http_path_gets_leading_slash() {
        let cfg = parse(&["interzoid-mcp", "--streamableHttpPath", "rpc"]).expect("parse");
        assert_eq!(cfg.streamable_http_path, "/rpc");
        let err = parse(&["interzoid-mcp", "--streamableHttpPath", "/"]).expect_err("root path");
        assert!(matches!(err, ConfigError::InvalidArg(_)));
    }

    #[test]
    fn cors_flag_variants() {
        let cfg = parse(&["interzoid-mcp", "--cors"]).expect("bare cors");
        assert_eq!(cfg.cors, CorsConfig::AllowAll);

        let cfg = parse(&["interzoid-mcp", "--cors", "*"]).expect("wildcard cors");
        assert_eq!(cfg.cors, CorsConfig::AllowAll);

        let cfg = parse(&[
            "interzoid-mcp",
            "--cors",
            "https://a.example",
            "--cors",
            "https://b.example",
        ])
        .expect("allow list");
        assert_eq!(
            cfg.cors,
            CorsConfig::AllowList {
                raw: vec!["https://a.example".into(), "https://b.example".into()]
            }
        );
    }

    #[test]
    fn collects_health_endpoints() {
        let cfg = parse(&[
            "interzoid-mcp",
            "--healthEndpoint",
            "/healthz",
            "--healthEndpoint",
            "/readyz",
        ])
        .expect("parse");
        assert_eq!(cfg.health_endpoints, vec!["/healthz", "/readyz"]);
    }
}
