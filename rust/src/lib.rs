//! MCP server exposing the Interzoid data-quality APIs as tools.
//!
//! Each tool call becomes one authenticated `GET` against the Interzoid API.
//! Callers without an API key get the x402 payment requirements back as a
//! normal result rather than an error.

pub mod catalog;
pub mod config;
pub mod credential;
pub mod dispatch;
pub mod error;
pub mod executor;
pub mod gateways;
pub mod protocol;
pub mod server;
pub mod support;
