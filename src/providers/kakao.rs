//! Kakao (Daum) book search adapter.
//!
//! API documentation: <https://developers.kakao.com/docs/latest/ko/daum-search/dev-guide#search-book>

use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use url::Url;

use crate::config::ProviderConfig;
use crate::models::{
    CallOutcome, KakaoSearchRequest, KakaoSearchResponse, ProviderFailure, ProviderId,
    SearchRequest, SearchResult,
};
use crate::providers::{credential_header, log_failure, misrouted, BookProvider, ProviderError};
use crate::utils::{endpoint_url, HttpClient};

const BOOK_SEARCH_PATH: &str = "/v3/search/book";

/// Kakao book search, authenticated with a REST API key header
#[derive(Debug, Clone)]
pub struct KakaoProvider {
    client: HttpClient,
    endpoint: Url,
    authorization: HeaderValue,
}

impl KakaoProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        if config.api_key.is_empty() {
            tracing::warn!("Kakao REST API key not set - requests will be rejected upstream");
        }

        Ok(Self {
            client: HttpClient::for_provider(config)?,
            endpoint: endpoint_url(&config.base_url, BOOK_SEARCH_PATH)?,
            authorization: credential_header(
                ProviderId::Kakao,
                &format!("KakaoAK {}", config.api_key.expose()),
            )?,
        })
    }

    /// Search Kakao, returning the native response on success
    pub async fn search(
        &self,
        request: &KakaoSearchRequest,
    ) -> Result<KakaoSearchResponse, ProviderFailure> {
        request
            .validate()
            .map_err(|e| ProviderFailure::invalid_request(ProviderId::Kakao, &e))?;

        tracing::debug!(
            query = %request.query,
            search_target = ?request.target,
            page = request.page,
            size = request.size,
            "Searching Kakao"
        );

        let mut params = vec![("query", request.query.clone())];
        if let Some(target) = request.target {
            params.push(("target", target.as_str().to_string()));
        }
        params.push(("sort", request.sort.as_str().to_string()));
        params.push(("page", request.page.to_string()));
        params.push(("size", request.size.to_string()));

        let http = self
            .client
            .client()
            .get(self.endpoint.clone())
            .header(AUTHORIZATION, self.authorization.clone())
            .query(&params);

        self.client.send_json(ProviderId::Kakao, http).await
    }
}

#[async_trait]
impl BookProvider for KakaoProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Kakao
    }

    async fn call(&self, request: &SearchRequest) -> CallOutcome {
        let SearchRequest::Kakao(request) = request else {
            misrouted(ProviderId::Kakao, request)
        };

        self.search(request)
            .await
            .map(SearchResult::Kakao)
            .inspect_err(log_failure)
    }
}
