//! HTTP entry point.
//!
//! Routes under `/api/external`:
//!
//! - `POST /aladin`, `POST /kakao`, `POST /naver`: one provider search,
//!   answering with the provider's native JSON
//! - `GET /search/unified`, `GET /search/multiple`: fan a keyword out to the
//!   providers selected with `includeAladin`, `includeKakao`, `includeNaver`
//! - `GET /search/statistics`: summary numbers for a keyword
//! - `GET /health`: live probe of every provider
//!
//! Failed calls map to 400 (invalid request), 502 (upstream or decode) or
//! 504 (transport), with an [`ErrorResponse`] body.

mod error;
mod handlers;

pub use error::{ApiError, ErrorResponse};

use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::facade::BooksFacade;

/// Shared handler state
#[derive(Debug, Clone)]
pub struct AppState {
    pub facade: Arc<BooksFacade>,
}

impl AppState {
    pub fn new(facade: BooksFacade) -> Self {
        Self {
            facade: Arc::new(facade),
        }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    let external = Router::new()
        .route("/aladin", post(handlers::search_aladin))
        .route("/kakao", post(handlers::search_kakao))
        .route("/naver", post(handlers::search_naver))
        .route("/search/unified", get(handlers::unified_search))
        .route("/search/multiple", get(handlers::unified_search))
        .route("/search/statistics", get(handlers::search_statistics))
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/external", external)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the API on `addr` until Ctrl+C
pub async fn serve(facade: BooksFacade, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(AppState::new(facade));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Book search API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ProviderConfig};
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use mockito::{Matcher, Server, ServerGuard};
    use serde_json::Value;
    use tower::ServiceExt;

    const KAKAO_BODY: &str =
        r#"{"documents": [], "meta": {"total_count": 3, "pageable_count": 3, "is_end": true}}"#;

    fn app(server: &ServerGuard) -> Router {
        let mut config = Config::default();
        config.providers.aladin = ProviderConfig::new(server.url(), "ttb");
        config.providers.kakao = ProviderConfig::new(server.url(), "kakao");
        config.providers.naver = ProviderConfig::new(server.url(), "id").with_secret("secret");
        router(AppState::new(BooksFacade::from_config(&config).unwrap()))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_kakao_route_returns_native_json() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v3/search/book")
            .match_header("authorization", "KakaoAK kakao")
            .match_query(Matcher::UrlEncoded("query".into(), "rust".into()))
            .with_status(200)
            .with_body(KAKAO_BODY)
            .create_async()
            .await;

        let response = app(&server)
            .oneshot(post_json("/api/external/kakao", r#"{"query": "rust"}"#))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["meta"]["total_count"], 3);
        assert!(body["documents"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_query_is_rejected_before_the_provider() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v3/search/book")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let response = app(&server)
            .oneshot(post_json(
                "/api/external/kakao",
                r#"{"query": "", "target": "title"}"#,
            ))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["kind"], "invalid_request");
        assert_eq!(body["provider"], "kakao");
    }

    #[tokio::test]
    async fn test_upstream_failure_maps_to_bad_gateway() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/search/book.json")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"errorMessage":"Authentication failed"}"#)
            .create_async()
            .await;

        let response = app(&server)
            .oneshot(post_json("/api/external/naver", r#"{"keyword": "spring"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = json_body(response).await;
        assert_eq!(body["kind"], "upstream");
        assert_eq!(body["upstreamStatus"], 401);
    }

    #[tokio::test]
    async fn test_malformed_json_never_reaches_the_facade() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/ttb/api/ItemSearch.aspx")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let response = app(&server)
            .oneshot(post_json("/api/external/aladin", r#"{"query": "#))
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_unified_search_honours_include_flags() {
        let mut server = Server::new_async().await;
        let aladin = server
            .mock("POST", "/ttb/api/ItemSearch.aspx")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let _kakao = server
            .mock("GET", "/v3/search/book")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(KAKAO_BODY)
            .create_async()
            .await;
        let naver = server
            .mock("GET", "/v1/search/book.json")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let response = app(&server)
            .oneshot(get(
                "/api/external/search/unified?keyword=rust&includeAladin=false&includeNaver=false",
            ))
            .await
            .unwrap();

        aladin.assert_async().await;
        naver.assert_async().await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["keyword"], "rust");
        assert!(body["aladin"].is_null());
        assert_eq!(body["kakao"]["status"], "success");
    }

    #[tokio::test]
    async fn test_statistics_requires_keyword() {
        let server = Server::new_async().await;

        let response = app(&server)
            .oneshot(get("/api/external/search/statistics?keyword=%20"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health_reports_per_service_status() {
        let mut server = Server::new_async().await;
        let _kakao = server
            .mock("GET", "/v3/search/book")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(KAKAO_BODY)
            .create_async()
            .await;

        let response = app(&server).oneshot(get("/api/external/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "UP");
        assert_eq!(body["services"]["kakao"], "UP");
        assert_eq!(body["services"]["aladin"], "DOWN");
        assert_eq!(body["totalApis"], 3);
    }
}
