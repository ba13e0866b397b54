//! Core data models for book search requests, responses and outcomes.

mod outcome;
mod provider;
mod request;
mod response;

pub use outcome::{snippet, CallOutcome, ErrorKind, ProviderFailure, MAX_BODY_SNIPPET};
pub use provider::ProviderId;
pub use request::{
    AladinOutput, AladinQueryType, AladinSearchRequest, AladinSearchTarget, AladinSort,
    KakaoSearchRequest, KakaoSort, KakaoTarget, NaverSearchRequest, NaverSort,
    RequestValidationError, SearchRequest, ALADIN_API_VERSION,
};
pub use response::{
    AladinItem, AladinSearchResponse, AladinSeriesInfo, KakaoDocument, KakaoMeta,
    KakaoSearchResponse, NaverItem, NaverSearchResponse, SearchResult,
};
