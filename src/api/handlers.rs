//! Route handlers.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{ApiError, AppState};
use crate::facade::{HealthReport, ProviderSelection, SearchStatistics, UnifiedSearchResult};
use crate::models::{
    AladinSearchRequest, KakaoSearchRequest, NaverSearchRequest, SearchRequest, SearchResult,
};

fn default_true() -> bool {
    true
}

/// Query string of the unified search routes
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedQuery {
    pub keyword: String,
    #[serde(default = "default_true")]
    pub include_aladin: bool,
    #[serde(default = "default_true")]
    pub include_kakao: bool,
    #[serde(default = "default_true")]
    pub include_naver: bool,
}

impl UnifiedQuery {
    fn selection(&self) -> ProviderSelection {
        ProviderSelection {
            aladin: self.include_aladin,
            kakao: self.include_kakao,
            naver: self.include_naver,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct KeywordQuery {
    pub keyword: String,
}

/// POST /api/external/aladin
pub async fn search_aladin(
    State(state): State<AppState>,
    Json(request): Json<AladinSearchRequest>,
) -> Result<Json<SearchResult>, ApiError> {
    search_one(&state, request.into()).await
}

/// POST /api/external/kakao
pub async fn search_kakao(
    State(state): State<AppState>,
    Json(request): Json<KakaoSearchRequest>,
) -> Result<Json<SearchResult>, ApiError> {
    search_one(&state, request.into()).await
}

/// POST /api/external/naver
///
/// Accepts `keyword` as an alias of `query`.
pub async fn search_naver(
    State(state): State<AppState>,
    Json(request): Json<NaverSearchRequest>,
) -> Result<Json<SearchResult>, ApiError> {
    search_one(&state, request.into()).await
}

async fn search_one(
    state: &AppState,
    request: SearchRequest,
) -> Result<Json<SearchResult>, ApiError> {
    let provider = request.provider();
    if let Err(e) = request.validate() {
        warn!(provider = provider.id(), "Rejected search request: {}", e);
        return Err(ApiError::validation(provider, &e));
    }

    debug!(provider = provider.id(), query = request.query(), "Search request");
    let result = state.facade.search(&request).await?;
    Ok(Json(result))
}

/// GET /api/external/search/unified
pub async fn unified_search(
    State(state): State<AppState>,
    Query(query): Query<UnifiedQuery>,
) -> Result<Json<UnifiedSearchResult>, ApiError> {
    require_keyword(&query.keyword)?;
    let result = state
        .facade
        .search_multiple(&query.keyword, query.selection())
        .await;
    Ok(Json(result))
}

/// GET /api/external/search/statistics
pub async fn search_statistics(
    State(state): State<AppState>,
    Query(query): Query<KeywordQuery>,
) -> Result<Json<SearchStatistics>, ApiError> {
    require_keyword(&query.keyword)?;
    Ok(Json(state.facade.statistics(&query.keyword).await))
}

/// GET /api/external/health
pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    Json(state.facade.health().await)
}

fn require_keyword(keyword: &str) -> Result<(), ApiError> {
    if keyword.trim().is_empty() {
        warn!("Rejected unified search without keyword");
        return Err(ApiError::InvalidRequest {
            provider: None,
            message: "keyword must not be empty".to_string(),
        });
    }
    Ok(())
}
