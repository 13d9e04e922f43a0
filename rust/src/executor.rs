use std::time::{Duration, Instant};

use reqwest::StatusCode;
use serde_json::{Map, Value};
use url::Url;

use crate::credential::CredentialContext;
use crate::dispatch::OutboundParams;
use crate::error::CallError;

pub const DEFAULT_API_BASE_URL: &str = "https://api.interzoid.com";
pub const API_KEY_HEADER: &str = "x-api-key";

const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Classified result of one remote call. Exactly one variant per call.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(Map<String, Value>),
    /// The remote API wants payment first; the document is relayed untouched.
    PaymentRequired(Map<String, Value>),
    Error(CallError),
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::PaymentRequired(_) => "payment_required",
            Self::Error(err) => err.kind(),
        }
    }
}

/// Issues GET requests against the remote API and classifies the responses.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    http: reqwest::Client,
    base_url: String,
}

impl RequestExecutor {
    pub fn new(base_url: &str) -> Result<Self, String> {
        Self::with_timeout(base_url, HTTP_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, request_timeout: Duration) -> Result<Self, String> {
        let base_url = normalize_base_url(base_url)?;
        let http = reqwest::Client::builder()
            .connect_timeout(HTTP_CONNECT_TIMEOUT)
            .timeout(request_timeout)
            .build()
            .map_err(|err| format!("Failed to build HTTP client: {err}"))?;
        Ok(Self { http, base_url })
    }

    pub fn build_url(&self, endpoint: &str, params: &OutboundParams) -> Result<Url, CallError> {
        let mut url = Url::parse(&format!("{}{endpoint}", self.base_url))
            .map_err(|err| CallError::TransportFailure(format!("invalid endpoint URL: {err}")))?;
        if !params.is_empty() {
            let mut query = url.query_pairs_mut();
            for (name, value) in params.iter() {
                query.append_pair(name, value);
            }
        }
        Ok(url)
    }

    pub async fn execute(
        &self,
        credential: &CredentialContext,
        endpoint: &str,
        params: &OutboundParams,
    ) -> Outcome {
        let url = match self.build_url(endpoint, params) {
            Ok(url) => url,
            Err(err) => return Outcome::Error(err),
        };

        let mut request = self.http.get(url);
        if let Some(key) = credential.api_key() {
            request = request.header(API_KEY_HEADER, key);
        }

        let started = Instant::now();
        tracing::debug!(
            "  -> GET {endpoint} params={:?} credential={}",
            params.names().collect::<Vec<_>>(),
            credential.source().as_str()
        );

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::debug!("  <- {endpoint} transport error: {err}");
                return Outcome::Error(CallError::TransportFailure(format!(
                    "API request failed: {err}"
                )));
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                return Outcome::Error(CallError::TransportFailure(format!(
                    "failed to read response: {err}"
                )));
            }
        };

        let outcome = classify_response(status, &body);
        tracing::debug!(
            "  <- {endpoint} {status} ({}ms) {}",
            started.elapsed().as_millis(),
            outcome.label()
        );
        outcome
    }
}

/// Maps a status code and raw body onto an [`Outcome`].
pub fn classify_response(status: StatusCode, body: &str) -> Outcome {
    match status {
        StatusCode::PAYMENT_REQUIRED => match parse_document(body) {
            Ok(document) => Outcome::PaymentRequired(document),
            Err(_) => Outcome::Error(CallError::MalformedResponse(format!(
                "402 Payment Required: {body}"
            ))),
        },
        StatusCode::OK => match parse_document(body) {
            Ok(document) => Outcome::Success(document),
            Err(err) => Outcome::Error(CallError::MalformedResponse(format!(
                "failed to parse JSON response: {err}"
            ))),
        },
        other => Outcome::Error(CallError::RemoteError {
            status: other.as_u16(),
            body: body.to_string(),
        }),
    }
}

fn parse_document(body: &str) -> Result<Map<String, Value>, serde_json::Error> {
    serde_json::from_str::<Map<String, Value>>(body)
}

/// Trims a trailing slash and accepts only absolute `http`/`https` URLs.
pub fn normalize_base_url(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed =
        Url::parse(trimmed).map_err(|err| format!("Invalid API base URL '{raw}': {err}"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        scheme => Err(format!(
            "Invalid API base URL '{raw}': unsupported scheme '{scheme}'"
        )),
    }
}
