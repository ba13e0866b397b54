//! Mapping of call failures to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::models::{ErrorKind, ProviderFailure, ProviderId, RequestValidationError};

/// JSON body returned for every failed request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub provider: Option<ProviderId>,
    pub kind: ErrorKind,
    pub message: String,
    pub upstream_status: Option<u16>,
    pub upstream_body: Option<String>,
}

/// A request the HTTP layer could not satisfy
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Rejected before any provider was called
    InvalidRequest {
        provider: Option<ProviderId>,
        message: String,
    },
    /// The provider call failed
    Provider(ProviderFailure),
}

impl ApiError {
    pub fn validation(provider: ProviderId, err: &RequestValidationError) -> Self {
        ApiError::InvalidRequest {
            provider: Some(provider),
            message: err.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Provider(failure) => match failure.kind {
                ErrorKind::InvalidRequest => StatusCode::BAD_REQUEST,
                ErrorKind::Upstream | ErrorKind::Decode => StatusCode::BAD_GATEWAY,
                ErrorKind::Transport => StatusCode::GATEWAY_TIMEOUT,
            },
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        match self {
            ApiError::InvalidRequest { provider, message } => ErrorResponse {
                provider: *provider,
                kind: ErrorKind::InvalidRequest,
                message: message.clone(),
                upstream_status: None,
                upstream_body: None,
            },
            ApiError::Provider(failure) => ErrorResponse {
                provider: Some(failure.provider),
                kind: failure.kind,
                message: failure.message.clone(),
                upstream_status: failure.status,
                upstream_body: failure.body.clone(),
            },
        }
    }
}

impl From<ProviderFailure> for ApiError {
    fn from(failure: ProviderFailure) -> Self {
        ApiError::Provider(failure)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_response())).into_response()
    }
}
