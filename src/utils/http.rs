//! HTTP client utilities.

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use crate::config::ProviderConfig;
use crate::models::{ProviderFailure, ProviderId};
use crate::providers::ProviderError;

const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client bound to one provider's timeout
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Create a client whose every request is limited by the provider's timeout
    pub fn for_provider(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let timeout = config.timeout();
        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(timeout)
            .connect_timeout(timeout.min(MAX_CONNECT_TIMEOUT))
            .build()?;

        Ok(Self { client, timeout })
    }

    /// Get the underlying client
    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send a request once and decode a 2xx JSON body.
    ///
    /// Non-2xx responses are returned as [`ErrorKind::Upstream`] without
    /// decoding; connect failures and timeouts as [`ErrorKind::Transport`].
    ///
    /// [`ErrorKind::Upstream`]: crate::models::ErrorKind::Upstream
    /// [`ErrorKind::Transport`]: crate::models::ErrorKind::Transport
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        provider: ProviderId,
        request: RequestBuilder,
    ) -> Result<T, ProviderFailure> {
        let response = request
            .send()
            .await
            .map_err(|e| ProviderFailure::transport(provider, describe(&e, self.timeout)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.ok();
            return Err(ProviderFailure::upstream(
                provider,
                status.as_u16(),
                body.as_deref(),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderFailure::transport(provider, describe(&e, self.timeout)))?;

        serde_json::from_str(&body)
            .map_err(|e| ProviderFailure::decode(provider, status.as_u16(), &body, e))
    }
}

fn describe(err: &reqwest::Error, timeout: Duration) -> String {
    if err.is_timeout() {
        format!("request timed out after {:?}", timeout)
    } else if err.is_connect() {
        format!("connection failed: {}", err)
    } else {
        format!("request failed: {}", err)
    }
}

/// Resolve `path` against `base_url`, keeping any path prefix of the base
pub fn endpoint_url(base_url: &str, path: &str) -> Result<Url, ProviderError> {
    let invalid = |reason: String| ProviderError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason,
    };

    let mut base = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
        return Err(invalid("expected an http(s) URL".to_string()));
    }
    if !base.path().ends_with('/') {
        let prefixed = format!("{}/", base.path());
        base.set_path(&prefixed);
    }

    base.join(path.trim_start_matches('/'))
        .map_err(|e| invalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_plain_host() {
        let url = endpoint_url("https://dapi.kakao.com", "/v3/search/book").unwrap();
        assert_eq!(url.as_str(), "https://dapi.kakao.com/v3/search/book");
    }

    #[test]
    fn test_endpoint_url_keeps_prefix() {
        let url = endpoint_url("http://gateway.local/naver", "/v1/search/book.json").unwrap();
        assert_eq!(url.as_str(), "http://gateway.local/naver/v1/search/book.json");
    }

    #[test]
    fn test_endpoint_url_rejects_garbage() {
        assert!(matches!(
            endpoint_url("not a url", "/x"),
            Err(ProviderError::InvalidBaseUrl { .. })
        ));
        assert!(endpoint_url("ftp://example.com", "/x").is_err());
    }

    #[test]
    fn test_client_uses_provider_timeout() {
        let config = ProviderConfig::new("http://127.0.0.1:1", "key")
            .with_timeout(Duration::from_secs(3));
        let client = HttpClient::for_provider(&config).unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(3));
    }
}
