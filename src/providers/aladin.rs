//! Aladin `ItemSearch` adapter.
//!
//! API documentation: <https://blog.aladin.co.kr/openapi>
//!
//! The TTB key travels as the `ttbkey` query parameter of a body-less POST.

use async_trait::async_trait;
use url::Url;

use crate::config::{ProviderConfig, Secret};
use crate::models::{
    AladinSearchRequest, AladinSearchResponse, CallOutcome, ProviderFailure, ProviderId,
    SearchRequest, SearchResult,
};
use crate::providers::{log_failure, misrouted, BookProvider, ProviderError};
use crate::utils::{endpoint_url, HttpClient};

const ITEM_SEARCH_PATH: &str = "/ttb/api/ItemSearch.aspx";

/// Aladin book search
#[derive(Debug, Clone)]
pub struct AladinProvider {
    client: HttpClient,
    endpoint: Url,
    ttb_key: Secret,
}

impl AladinProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        if config.api_key.is_empty() {
            tracing::warn!("Aladin TTB key not set - requests will be rejected upstream");
        }

        Ok(Self {
            client: HttpClient::for_provider(config)?,
            endpoint: endpoint_url(&config.base_url, ITEM_SEARCH_PATH)?,
            ttb_key: config.api_key.clone(),
        })
    }

    /// Search Aladin, returning the native response on success
    pub async fn search(
        &self,
        request: &AladinSearchRequest,
    ) -> Result<AladinSearchResponse, ProviderFailure> {
        request
            .validate()
            .map_err(|e| ProviderFailure::invalid_request(ProviderId::Aladin, &e))?;

        tracing::debug!(
            query = %request.query,
            query_type = request.query_type.as_str(),
            max_results = request.max_results,
            start = request.start,
            "Searching Aladin"
        );

        let params = [
            ("ttbkey", self.ttb_key.expose().to_string()),
            ("Query", request.query.clone()),
            ("QueryType", request.query_type.as_str().to_string()),
            ("MaxResults", request.max_results.to_string()),
            ("start", request.start.to_string()),
            ("SearchTarget", request.search_target.as_str().to_string()),
            ("Sort", request.sort.as_str().to_string()),
            ("output", request.output.as_str().to_string()),
            ("Version", request.version.clone()),
        ];

        let http = self.client.client().post(self.endpoint.clone()).query(&params[..]);

        self.client.send_json(ProviderId::Aladin, http).await
    }
}

#[async_trait]
impl BookProvider for AladinProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Aladin
    }

    async fn call(&self, request: &SearchRequest) -> CallOutcome {
        let SearchRequest::Aladin(request) = request else {
            misrouted(ProviderId::Aladin, request)
        };

        self.search(request)
            .await
            .map(SearchResult::Aladin)
            .inspect_err(log_failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AladinSearchTarget, AladinSort, ErrorKind};
    use crate::utils::testing::{closed_port_url, unresponsive_server};
    use mockito::{Matcher, Server};
    use std::time::{Duration, Instant};

    const CLEAN_CODE: &str = r#"{
        "version": "20131101",
        "title": "Aladin search - clean code",
        "totalResults": 145,
        "startIndex": 1,
        "itemsPerPage": 10,
        "query": "clean code",
        "item": [{
            "title": "Clean Code",
            "author": "Robert C. Martin",
            "isbn13": "9788966260959",
            "itemId": 34083680,
            "priceSales": 29700,
            "priceStandard": 33000,
            "publisher": "Insight"
        }]
    }"#;

    fn provider(base_url: &str) -> AladinProvider {
        AladinProvider::new(&ProviderConfig::new(base_url, "test-ttb-key")).unwrap()
    }

    fn param(name: &str, value: &str) -> Matcher {
        Matcher::UrlEncoded(name.into(), value.into())
    }

    #[tokio::test]
    async fn test_search_sends_wire_parameters() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", ITEM_SEARCH_PATH)
            .match_query(Matcher::AllOf(vec![
                param("ttbkey", "test-ttb-key"),
                param("Query", "clean code"),
                param("QueryType", "Keyword"),
                param("MaxResults", "10"),
                param("start", "1"),
                param("SearchTarget", "Book"),
                param("Sort", "PublishTime"),
                param("output", "JS"),
                param("Version", "20131101"),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(CLEAN_CODE)
            .create_async()
            .await;

        let response = provider(&server.url())
            .search(&AladinSearchRequest::new("clean code"))
            .await
            .unwrap();

        mock.assert_async().await;
        let expected: AladinSearchResponse = serde_json::from_str(CLEAN_CODE).unwrap();
        assert_eq!(response, expected);
        assert_eq!(response.total_results, 145);
    }

    #[tokio::test]
    async fn test_search_forwards_non_default_options() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", ITEM_SEARCH_PATH)
            .match_query(Matcher::AllOf(vec![
                param("MaxResults", "50"),
                param("start", "3"),
                param("SearchTarget", "eBook"),
                param("Sort", "SalesPoint"),
            ]))
            .with_status(200)
            .with_body(CLEAN_CODE)
            .create_async()
            .await;

        let request = AladinSearchRequest::new("clean code")
            .max_results(50)
            .start(3)
            .search_target(AladinSearchTarget::EBook)
            .sort(AladinSort::SalesPoint);
        let result = provider(&server.url()).call(&request.into()).await;

        mock.assert_async().await;
        assert_eq!(result.unwrap().provider(), ProviderId::Aladin);
    }

    #[tokio::test]
    async fn test_non_success_status_is_upstream() {
        for status in [400, 401, 500] {
            let mut server = Server::new_async().await;
            let _mock = server
                .mock("POST", ITEM_SEARCH_PATH)
                .match_query(Matcher::Any)
                .with_status(status)
                .with_body("error page")
                .create_async()
                .await;

            let failure = provider(&server.url())
                .search(&AladinSearchRequest::new("clean code"))
                .await
                .unwrap_err();

            assert_eq!(failure.kind, ErrorKind::Upstream);
            assert_eq!(failure.status, Some(status as u16));
            assert_eq!(failure.body.as_deref(), Some("error page"));
        }
    }

    #[tokio::test]
    async fn test_error_payload_with_ok_status_is_decode() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", ITEM_SEARCH_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"errorCode": 3, "errorMessage": "invalid ttbkey"}"#)
            .create_async()
            .await;

        let failure = provider(&server.url())
            .search(&AladinSearchRequest::new("clean code"))
            .await
            .unwrap_err();

        assert_eq!(failure.kind, ErrorKind::Decode);
        assert_eq!(failure.status, Some(200));
        assert!(failure.body.unwrap().contains("invalid ttbkey"));
    }

    #[tokio::test]
    async fn test_blank_query_never_reaches_network() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", ITEM_SEARCH_PATH)
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let failure = provider(&server.url())
            .search(&AladinSearchRequest::new("   "))
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert_eq!(failure.kind, ErrorKind::InvalidRequest);
        assert_eq!(failure.status, None);
    }

    #[tokio::test]
    async fn test_timeout_is_transport() {
        let (url, server) = unresponsive_server().await;
        let provider = AladinProvider::new(
            &ProviderConfig::new(url, "test-ttb-key").with_timeout(Duration::from_secs(1)),
        )
        .unwrap();

        let started = Instant::now();
        let failure = provider
            .search(&AladinSearchRequest::new("clean code"))
            .await
            .unwrap_err();

        assert_eq!(failure.kind, ErrorKind::Transport);
        assert_eq!(failure.status, None);
        assert!(started.elapsed() < Duration::from_secs(5));
        server.abort();
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport() {
        let failure = provider(&closed_port_url().await)
            .search(&AladinSearchRequest::new("clean code"))
            .await
            .unwrap_err();

        assert_eq!(failure.kind, ErrorKind::Transport);
        assert_eq!(failure.body, None);
    }
}
