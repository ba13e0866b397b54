//! Naver book search adapter.
//!
//! API documentation: <https://developers.naver.com/docs/serviceapi/search/book/book.md>
//!
//! Authenticated with an application's client id and secret, each sent in
//! its own header.

use async_trait::async_trait;
use reqwest::header::HeaderValue;
use url::Url;

use crate::config::ProviderConfig;
use crate::models::{
    CallOutcome, NaverSearchRequest, NaverSearchResponse, ProviderFailure, ProviderId,
    SearchRequest, SearchResult,
};
use crate::providers::{credential_header, log_failure, misrouted, BookProvider, ProviderError};
use crate::utils::{endpoint_url, HttpClient};

const BOOK_SEARCH_PATH: &str = "/v1/search/book.json";

/// Naver book search
#[derive(Debug, Clone)]
pub struct NaverProvider {
    client: HttpClient,
    endpoint: Url,
    client_id: HeaderValue,
    client_secret: HeaderValue,
}

impl NaverProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        if config.api_key.is_empty() || config.api_secret.is_empty() {
            tracing::warn!("Naver client id or secret not set - requests will be rejected upstream");
        }

        Ok(Self {
            client: HttpClient::for_provider(config)?,
            endpoint: endpoint_url(&config.base_url, BOOK_SEARCH_PATH)?,
            client_id: credential_header(ProviderId::Naver, config.api_key.expose())?,
            client_secret: credential_header(ProviderId::Naver, config.api_secret.expose())?,
        })
    }

    /// Search Naver, returning the native response on success
    pub async fn search(
        &self,
        request: &NaverSearchRequest,
    ) -> Result<NaverSearchResponse, ProviderFailure> {
        request
            .validate()
            .map_err(|e| ProviderFailure::invalid_request(ProviderId::Naver, &e))?;

        tracing::debug!(
            query = %request.query,
            display = request.display,
            start = request.start,
            "Searching Naver"
        );

        let params = [
            ("query", request.query.clone()),
            ("display", request.display.to_string()),
            ("start", request.start.to_string()),
            ("sort", request.sort.as_str().to_string()),
        ];

        let http = self
            .client
            .client()
            .get(self.endpoint.clone())
            .header("X-Naver-Client-Id", self.client_id.clone())
            .header("X-Naver-Client-Secret", self.client_secret.clone())
            .query(&params[..]);

        self.client.send_json(ProviderId::Naver, http).await
    }
}

#[async_trait]
impl BookProvider for NaverProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Naver
    }

    async fn call(&self, request: &SearchRequest) -> CallOutcome {
        let SearchRequest::Naver(request) = request else {
            misrouted(ProviderId::Naver, request)
        };

        self.search(request)
            .await
            .map(SearchResult::Naver)
            .inspect_err(log_failure)
    }
}
