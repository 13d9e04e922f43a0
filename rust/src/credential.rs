use std::fmt;

/// Where the credential for one call came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Envelope,
    Process,
    None,
}

impl CredentialSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Envelope => "envelope",
            Self::Process => "process",
            Self::None => "none",
        }
    }
}

/// Credential chosen for a single dispatch. Never stored past the call.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialContext {
    resolved: Option<String>,
    source: CredentialSource,
}

impl CredentialContext {
    /// A non-empty envelope credential wins, then the process-wide one, then nothing.
    pub fn resolve(envelope: Option<&str>, process_wide: Option<&str>) -> Self {
        if let Some(key) = non_empty(envelope) {
            return Self {
                resolved: Some(key.to_string()),
                source: CredentialSource::Envelope,
            };
        }
        if let Some(key) = non_empty(process_wide) {
            return Self {
                resolved: Some(key.to_string()),
                source: CredentialSource::Process,
            };
        }
        Self::none()
    }

    pub fn none() -> Self {
        Self {
            resolved: None,
            source: CredentialSource::None,
        }
    }

    pub fn api_key(&self) -> Option<&str> {
        self.resolved.as_deref()
    }

    pub fn source(&self) -> CredentialSource {
        self.source
    }
}

impl fmt::Debug for CredentialContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialContext")
            .field("resolved", &self.resolved.as_ref().map(|_| "<redacted>"))
            .field("source", &self.source)
            .finish()
    }
}

/// Extracts the API key from an `Authorization` header value.
///
/// Accepts both `Bearer <key>` and a bare key.
pub fn credential_from_authorization(raw: &str) -> Option<String> {
    let raw = raw.trim_start();
    let key = raw
        .strip_prefix("Bearer ")
        .or_else(|| raw.strip_prefix("bearer "))
        .unwrap_or(raw)
        .trim();
    if key.is_empty() {
        None
    } else {
        Some(key.to_string())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
