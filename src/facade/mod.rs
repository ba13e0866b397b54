//! Aggregation facade over the three book search providers.
//!
//! [`BooksFacade::search`] routes a tagged request to exactly one adapter and
//! hands its outcome back untouched. The unified operations fan a single
//! keyword out to several providers concurrently and keep each provider's
//! outcome separate.

mod unified;

pub use unified::{
    HealthReport, ProviderReport, ProviderSelection, SearchStatistics, ServiceStatus,
    ServiceStatuses, UnifiedSearchResult,
};

use chrono::Utc;

use crate::config::Config;
use crate::models::{
    AladinSearchRequest, AladinSearchResponse, CallOutcome, KakaoSearchRequest,
    KakaoSearchResponse, KakaoTarget, NaverSearchRequest, NaverSearchResponse, ProviderFailure,
    SearchRequest,
};
use crate::providers::{AladinProvider, BookProvider, KakaoProvider, NaverProvider, ProviderError};

/// Keyword used to probe providers in [`BooksFacade::health`]
pub const HEALTH_CHECK_KEYWORD: &str = "health-check";

/// Entry point for book searches
#[derive(Debug, Clone)]
pub struct BooksFacade {
    aladin: AladinProvider,
    kakao: KakaoProvider,
    naver: NaverProvider,
}

impl BooksFacade {
    pub fn new(aladin: AladinProvider, kakao: KakaoProvider, naver: NaverProvider) -> Self {
        Self {
            aladin,
            kakao,
            naver,
        }
    }

    /// Build all three adapters from configuration
    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        Ok(Self::new(
            AladinProvider::new(&config.providers.aladin)?,
            KakaoProvider::new(&config.providers.kakao)?,
            NaverProvider::new(&config.providers.naver)?,
        ))
    }

    /// Run a request against the provider it is tagged for
    pub async fn search(&self, request: &SearchRequest) -> CallOutcome {
        match request {
            SearchRequest::Aladin(_) => self.aladin.call(request).await,
            SearchRequest::Kakao(_) => self.kakao.call(request).await,
            SearchRequest::Naver(_) => self.naver.call(request).await,
        }
    }

    pub async fn search_aladin(
        &self,
        request: &AladinSearchRequest,
    ) -> Result<AladinSearchResponse, ProviderFailure> {
        self.aladin.search(request).await
    }

    pub async fn search_kakao(
        &self,
        request: &KakaoSearchRequest,
    ) -> Result<KakaoSearchResponse, ProviderFailure> {
        self.kakao.search(request).await
    }

    pub async fn search_naver(
        &self,
        request: &NaverSearchRequest,
    ) -> Result<NaverSearchResponse, ProviderFailure> {
        self.naver.search(request).await
    }

    /// Search every provider for `keyword` concurrently
    pub async fn search_all(&self, keyword: &str) -> UnifiedSearchResult {
        self.search_multiple(keyword, ProviderSelection::all()).await
    }

    /// Search the selected providers for `keyword` concurrently.
    ///
    /// Each provider gets its default request; Kakao is restricted to titles.
    /// Providers left out of `selection` are reported as `None`.
    pub async fn search_multiple(
        &self,
        keyword: &str,
        selection: ProviderSelection,
    ) -> UnifiedSearchResult {
        tracing::debug!(keyword, ?selection, "Running unified search");

        let aladin_request = SearchRequest::from(AladinSearchRequest::new(keyword));
        let kakao_request =
            SearchRequest::from(KakaoSearchRequest::new(keyword).target(KakaoTarget::Title));
        let naver_request = SearchRequest::from(NaverSearchRequest::new(keyword));

        let (aladin, kakao, naver) = tokio::join!(
            self.call_if(selection.aladin, &self.aladin, &aladin_request),
            self.call_if(selection.kakao, &self.kakao, &kakao_request),
            self.call_if(selection.naver, &self.naver, &naver_request),
        );

        let result = UnifiedSearchResult {
            keyword: keyword.to_string(),
            aladin,
            kakao,
            naver,
            searched_at: Utc::now(),
        };

        tracing::info!(
            keyword,
            successful = result.successful_count(),
            failed = result.failed_count(),
            total_books = result.total_book_count(),
            "Unified search complete"
        );

        result
    }

    /// Search every provider and summarise the outcome
    pub async fn statistics(&self, keyword: &str) -> SearchStatistics {
        SearchStatistics::from(&self.search_all(keyword).await)
    }

    /// Probe every provider with a live search
    pub async fn health(&self) -> HealthReport {
        HealthReport::from(&self.search_all(HEALTH_CHECK_KEYWORD).await)
    }

    async fn call_if(
        &self,
        included: bool,
        provider: &dyn BookProvider,
        request: &SearchRequest,
    ) -> Option<ProviderReport> {
        if !included {
            return None;
        }
        Some(provider.call(request).await.into())
    }
}
