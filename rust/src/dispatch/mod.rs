mod params;

use std::fmt;
use std::sync::Arc;

use serde_json::{json, Map, Value};

use crate::catalog::ToolCatalog;
use crate::credential::CredentialContext;
use crate::error::UnknownTool;
use crate::executor::{Outcome, RequestExecutor};
use crate::protocol::ToolCallResult;

pub use params::{validate_arguments, OutboundParams};

/// Turns one `tools/call` into one remote request and renders the outcome as tool output.
///
/// Holds only read-only state, so a single instance is shared across all
/// concurrent calls.
#[derive(Clone)]
pub struct Dispatcher {
    catalog: Arc<ToolCatalog>,
    executor: RequestExecutor,
    process_credential: Option<String>,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("tools", &self.catalog.len())
            .field("executor", &self.executor)
            .field(
                "process_credential",
                &self.process_credential.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl Dispatcher {
    pub fn new(
        catalog: Arc<ToolCatalog>,
        executor: RequestExecutor,
        process_credential: Option<String>,
    ) -> Self {
        Self {
            catalog,
            executor,
            process_credential,
        }
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    /// Only an unknown tool name is an `Err`; every other failure is in-band text.
    pub async fn dispatch(
        &self,
        tool_name: &str,
        arguments: Option<&Value>,
        envelope_credential: Option<&str>,
    ) -> Result<ToolCallResult, UnknownTool> {
        let tool = self
            .catalog
            .get(tool_name)
            .ok_or_else(|| UnknownTool(tool_name.to_string()))?;

        let credential =
            CredentialContext::resolve(envelope_credential, self.process_credential.as_deref());

        let empty = Map::new();
        let arguments = arguments.and_then(Value::as_object).unwrap_or(&empty);

        let outcome = match validate_arguments(tool, arguments) {
            Ok(params) => {
                self.executor
                    .execute(&credential, tool.endpoint, &params)
                    .await
            }
            Err(err) => Outcome::Error(err),
        };

        tracing::info!(
            "tools/call {tool_name} [credential={}] -> {}",
            credential.source().as_str(),
            outcome.label()
        );

        Ok(render_outcome(outcome))
    }
}

/// Renders an outcome as the textual tool result returned to the agent.
pub fn render_outcome(outcome: Outcome) -> ToolCallResult {
    match outcome {
        Outcome::Success(document) => pretty(&Value::Object(document)),
        Outcome::PaymentRequired(requirements) => pretty(&json!({
            "status": "payment_required",
            "x402": true,
            "paymentRequirements": requirements,
        })),
        Outcome::Error(err) => ToolCallResult::error(err.to_string()),
    }
}

fn pretty(value: &Value) -> ToolCallResult {
    match serde_json::to_string_pretty(value) {
        Ok(text) => ToolCallResult::text(text),
        Err(err) => ToolCallResult::error(format!("Failed to format response: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{same, ToolDescriptor};
    use crate::error::CallError;

    fn dispatcher() -> Dispatcher {
        let catalog = ToolCatalog::new(vec![ToolDescriptor::new(
            "org_standard",
            "Standardize an org",
            "/getorgstandard",
        )
        .required(same("org", "Organization"))])
        .expect("catalog");
        // Port 9 (discard) is never contacted by these tests.
        let executor = RequestExecutor::new("http://127.0.0.1:9").expect("executor");
        Dispatcher::new(Arc::new(catalog), executor, None)
    }

    #[test]
    fn success_is_pretty_printed() {
        let mut doc = Map::new();
        doc.insert("score".to_string(), json!(98));
        let result = render_outcome(Outcome::Success(doc));
        assert!(!result.is_error());
        assert_eq!(result.first_text(), "{\n  \"score\": 98\n}");
    }

    #[test]
    fn payment_required_is_not_an_error() {
        let mut doc = Map::new();
        doc.insert("amount".to_string(), json!("12500"));
        let result = render_outcome(Outcome::PaymentRequired(doc));
        assert!(!result.is_error());
        let parsed: Value = serde_json::from_str(result.first_text()).expect("json text");
        assert_eq!(parsed["status"], "payment_required");
        assert_eq!(parsed["x402"], true);
        assert_eq!(parsed["paymentRequirements"], json!({"amount": "12500"}));
    }

    #[test]
    fn errors_become_in_band_text() {
        let result = render_outcome(Outcome::Error(CallError::RemoteError {
            status: 503,
            body: "busy".to_string(),
        }));
        assert!(result.is_error());
        assert_eq!(result.first_text(), "API returned status 503: busy");
    }

    #[tokio::test]
    async fn unknown_tool_is_the_only_err() {
        let err = dispatcher()
            .dispatch("nope", None, None)
            .await
            .expect_err("unknown tool");
        assert_eq!(err, UnknownTool("nope".to_string()));
    }

    #[tokio::test]
    async fn missing_parameter_short_circuits_before_network() {
        let result = dispatcher()
            .dispatch("org_standard", Some(&json!({})), None)
            .await
            .expect("known tool");
        assert!(result.is_error());
        assert_eq!(result.first_text(), "Missing required parameter: org");
    }

    #[tokio::test]
    async fn non_object_arguments_are_treated_as_empty() {
        let result = dispatcher()
            .dispatch("org_standard", Some(&json!("org=IBM")), None)
            .await
            .expect("known tool");
        assert_eq!(result.first_text(), "Missing required parameter: org");
    }
}
