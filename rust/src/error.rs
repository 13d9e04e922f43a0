use std::fmt;

/// Why a single tool call could not produce a payload.
///
/// Every variant is reported to the agent as in-band tool output; none of
/// them becomes a JSON-RPC fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    MissingParameter(String),
    InvalidParameterType(String),
    TransportFailure(String),
    MalformedResponse(String),
    RemoteError { status: u16, body: String },
}

impl CallError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingParameter(_) => "missing_parameter",
            Self::InvalidParameterType(_) => "invalid_parameter_type",
            Self::TransportFailure(_) => "transport_failure",
            Self::MalformedResponse(_) => "malformed_response",
            Self::RemoteError { .. } => "remote_error",
        }
    }
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingParameter(name) => write!(f, "Missing required parameter: {name}"),
            Self::InvalidParameterType(name) => write!(f, "Parameter {name} must be a string"),
            Self::TransportFailure(msg) => write!(f, "{msg}"),
            Self::MalformedResponse(msg) => write!(f, "{msg}"),
            Self::RemoteError { status, body } => {
                write!(f, "API returned status {status}: {body}")
            }
        }
    }
}

impl std::error::Error for CallError {}

/// Raised when a `tools/call` names a tool the catalog does not hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTool(pub String);

impl fmt::Display for UnknownTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown tool: {}", self.0)
    }
}

impl std::error::Error for UnknownTool {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_message_carries_status_and_body() {
        let err = CallError::RemoteError {
            status: 500,
            body: "internal error".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("500"));
        assert!(message.contains("internal error"));
        assert_eq!(err.kind(), "remote_error");
    }

    #[test]
    fn parameter_errors_name_the_parameter() {
        assert_eq!(
            CallError::MissingParameter("company".into()).to_string(),
            "Missing required parameter: company"
        );
        assert_eq!(
            CallError::InvalidParameterType("org1".into()).to_string(),
            "Parameter org1 must be a string"
        );
    }
}
