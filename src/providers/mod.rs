//! Book search provider adapters.
//!
//! Each adapter translates one typed request into its provider's wire format,
//! issues a single HTTP call and classifies the answer:
//!
//! | Provider | Method | Auth placement |
//! |----------|--------|----------------|
//! | [`AladinProvider`] | `POST`, no body | `ttbkey` query parameter |
//! | [`KakaoProvider`] | `GET` | `Authorization: KakaoAK <key>` header |
//! | [`NaverProvider`] | `GET` | `X-Naver-Client-Id` and `X-Naver-Client-Secret` headers |
//!
//! Adapters hold no mutable state and are cheap to clone, so a single
//! instance can serve any number of concurrent calls. There are no retries:
//! one attempt per call, bounded by the configured timeout.

mod aladin;
mod kakao;
mod naver;

pub use aladin::AladinProvider;
pub use kakao::KakaoProvider;
pub use naver::NaverProvider;

use async_trait::async_trait;
use reqwest::header::HeaderValue;

use crate::models::{CallOutcome, ProviderFailure, ProviderId, SearchRequest};

/// The capability shared by all provider adapters.
#[async_trait]
pub trait BookProvider: Send + Sync + std::fmt::Debug {
    /// Which provider this adapter talks to
    fn id(&self) -> ProviderId;

    /// Human-readable name of this provider
    fn name(&self) -> &str {
        self.id().name()
    }

    /// Run one search.
    ///
    /// # Panics
    ///
    /// If `request` is addressed to a different provider. Routing is the
    /// facade's job, so a mismatch is a bug rather than a runtime failure.
    async fn call(&self, request: &SearchRequest) -> CallOutcome;
}

/// Errors that can occur while building an adapter
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The configured base URL cannot be used
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// A credential cannot be sent as an HTTP header value
    #[error("Invalid {provider} credential: {reason}")]
    InvalidCredential {
        provider: ProviderId,
        reason: String,
    },

    /// The HTTP client could not be built
    #[error("Failed to create HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

fn misrouted(expected: ProviderId, request: &SearchRequest) -> ! {
    panic!(
        "{} adapter received a request addressed to {}",
        expected,
        request.provider()
    )
}

/// Build a redacted header value for a credential
fn credential_header(provider: ProviderId, value: &str) -> Result<HeaderValue, ProviderError> {
    let mut header =
        HeaderValue::from_str(value).map_err(|e| ProviderError::InvalidCredential {
            provider,
            reason: e.to_string(),
        })?;
    header.set_sensitive(true);
    Ok(header)
}

fn log_failure(failure: &ProviderFailure) {
    tracing::warn!(
        provider = failure.provider.id(),
        kind = %failure.kind,
        status = ?failure.status,
        "{}",
        failure.message
    );
}
