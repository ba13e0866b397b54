//! Outcome of a single provider call.

use serde::{Deserialize, Serialize};

use super::{ProviderId, RequestValidationError, SearchResult};

/// Longest upstream body kept on a failure, in characters
pub const MAX_BODY_SNIPPET: usize = 512;

/// The result of one provider invocation
pub type CallOutcome = Result<SearchResult, ProviderFailure>;

/// Classification of a failed provider call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The request broke a parameter invariant; nothing was sent
    InvalidRequest,
    /// Network failure or timeout; no upstream data
    Transport,
    /// The provider answered with a non-2xx status
    Upstream,
    /// A 2xx body did not match the provider schema
    Decode,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::InvalidRequest => "invalid request",
            ErrorKind::Transport => "transport error",
            ErrorKind::Upstream => "upstream error",
            ErrorKind::Decode => "decode error",
        };
        f.write_str(name)
    }
}

/// A provider call that did not produce a decoded response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("{provider} {kind}: {message}")]
pub struct ProviderFailure {
    pub provider: ProviderId,
    pub kind: ErrorKind,
    /// Upstream HTTP status, when a response was received
    pub status: Option<u16>,
    /// Truncated upstream body, when a response was received
    pub body: Option<String>,
    pub message: String,
}

impl ProviderFailure {
    pub fn invalid_request(provider: ProviderId, err: &RequestValidationError) -> Self {
        Self {
            provider,
            kind: ErrorKind::InvalidRequest,
            status: None,
            body: None,
            message: err.to_string(),
        }
    }

    pub fn transport(provider: ProviderId, message: impl Into<String>) -> Self {
        Self {
            provider,
            kind: ErrorKind::Transport,
            status: None,
            body: None,
            message: message.into(),
        }
    }

    pub fn upstream(provider: ProviderId, status: u16, body: Option<&str>) -> Self {
        Self {
            provider,
            kind: ErrorKind::Upstream,
            status: Some(status),
            body: body.map(snippet),
            message: format!("{} API returned status {}", provider, status),
        }
    }

    pub fn decode(
        provider: ProviderId,
        status: u16,
        body: &str,
        message: impl std::fmt::Display,
    ) -> Self {
        Self {
            provider,
            kind: ErrorKind::Decode,
            status: Some(status),
            body: Some(snippet(body)),
            message: format!("Failed to parse {} response: {}", provider, message),
        }
    }
}

/// Truncate a body to [`MAX_BODY_SNIPPET`] characters
pub fn snippet(body: &str) -> String {
    match body.char_indices().nth(MAX_BODY_SNIPPET) {
        Some((index, _)) => body[..index].to_string(),
        None => body.to_string(),
    }
}
