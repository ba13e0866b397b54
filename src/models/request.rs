//! Search request models, one per provider.
//!
//! Each request mirrors the query parameters its provider understands. JSON
//! field names follow the provider's own naming so the HTTP entry point can
//! accept the same shapes the upstream documentation describes.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ProviderId;

/// Default page size shared by all providers
const DEFAULT_PAGE_SIZE: u32 = 10;

/// Default Aladin API version
pub const ALADIN_API_VERSION: &str = "20131101";

/// A request that violates a provider's parameter invariants
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestValidationError {
    #[error("Search query must not be empty")]
    EmptyQuery,

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: u32,
        max: u32,
        value: u32,
    },

    #[error("Unsupported {field}: {value}")]
    Unsupported { field: &'static str, value: String },
}

fn require_query(query: &str) -> Result<(), RequestValidationError> {
    if query.trim().is_empty() {
        return Err(RequestValidationError::EmptyQuery);
    }
    Ok(())
}

fn require_range(
    field: &'static str,
    value: u32,
    min: u32,
    max: u32,
) -> Result<(), RequestValidationError> {
    if value < min || value > max {
        return Err(RequestValidationError::OutOfRange {
            field,
            min,
            max,
            value,
        });
    }
    Ok(())
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_start() -> u32 {
    1
}

fn default_aladin_version() -> String {
    ALADIN_API_VERSION.to_string()
}

// ========== ALADIN ==========

/// What the Aladin query string is matched against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum AladinQueryType {
    /// Title and author
    #[default]
    Keyword,
    Title,
    Author,
    Publisher,
}

impl AladinQueryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AladinQueryType::Keyword => "Keyword",
            AladinQueryType::Title => "Title",
            AladinQueryType::Author => "Author",
            AladinQueryType::Publisher => "Publisher",
        }
    }
}

/// Which Aladin mall to search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum AladinSearchTarget {
    #[default]
    Book,
    Foreign,
    Music,
    #[serde(rename = "DVD")]
    Dvd,
    Used,
    #[serde(rename = "eBook")]
    #[value(name = "ebook")]
    EBook,
    All,
}

impl AladinSearchTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            AladinSearchTarget::Book => "Book",
            AladinSearchTarget::Foreign => "Foreign",
            AladinSearchTarget::Music => "Music",
            AladinSearchTarget::Dvd => "DVD",
            AladinSearchTarget::Used => "Used",
            AladinSearchTarget::EBook => "eBook",
            AladinSearchTarget::All => "All",
        }
    }
}

/// Aladin result ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum AladinSort {
    Accuracy,
    #[default]
    PublishTime,
    Title,
    SalesPoint,
    CustomerRating,
    MyReviewCount,
}

impl AladinSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            AladinSort::Accuracy => "Accuracy",
            AladinSort::PublishTime => "PublishTime",
            AladinSort::Title => "Title",
            AladinSort::SalesPoint => "SalesPoint",
            AladinSort::CustomerRating => "CustomerRating",
            AladinSort::MyReviewCount => "MyReviewCount",
        }
    }
}

/// Aladin response encoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AladinOutput {
    #[default]
    #[serde(rename = "JS")]
    Js,
    #[serde(rename = "XML")]
    Xml,
}

impl AladinOutput {
    pub fn as_str(&self) -> &'static str {
        match self {
            AladinOutput::Js => "JS",
            AladinOutput::Xml => "XML",
        }
    }
}

/// Aladin `ItemSearch` request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AladinSearchRequest {
    /// Search query
    pub query: String,

    #[serde(default)]
    pub query_type: AladinQueryType,

    /// Page size (1-100)
    #[serde(default = "default_page_size")]
    pub max_results: u32,

    /// 1-based result page
    #[serde(default = "default_start")]
    pub start: u32,

    #[serde(default)]
    pub search_target: AladinSearchTarget,

    #[serde(default)]
    pub sort: AladinSort,

    /// Only `JS` can be decoded by the adapter
    #[serde(default)]
    pub output: AladinOutput,

    /// API version (date format)
    #[serde(default = "default_aladin_version")]
    pub version: String,
}

impl AladinSearchRequest {
    /// Create a request with the provider defaults
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            query_type: AladinQueryType::default(),
            max_results: DEFAULT_PAGE_SIZE,
            start: 1,
            search_target: AladinSearchTarget::default(),
            sort: AladinSort::default(),
            output: AladinOutput::default(),
            version: default_aladin_version(),
        }
    }

    pub fn query_type(mut self, query_type: AladinQueryType) -> Self {
        self.query_type = query_type;
        self
    }

    pub fn max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn start(mut self, start: u32) -> Self {
        self.start = start;
        self
    }

    pub fn search_target(mut self, target: AladinSearchTarget) -> Self {
        self.search_target = target;
        self
    }

    pub fn sort(mut self, sort: AladinSort) -> Self {
        self.sort = sort;
        self
    }

    pub fn validate(&self) -> Result<(), RequestValidationError> {
        require_query(&self.query)?;
        require_range("maxResults", self.max_results, 1, 100)?;
        require_range("start", self.start, 1, u32::MAX)?;
        if self.output != AladinOutput::Js {
            return Err(RequestValidationError::Unsupported {
                field: "output",
                value: self.output.as_str().to_string(),
            });
        }
        if self.version.trim().is_empty() {
            return Err(RequestValidationError::Unsupported {
                field: "version",
                value: self.version.clone(),
            });
        }
        Ok(())
    }
}

// ========== KAKAO ==========

/// Field the Kakao query is restricted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum KakaoTarget {
    Title,
    Isbn,
    Publisher,
    Person,
}

impl KakaoTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            KakaoTarget::Title => "title",
            KakaoTarget::Isbn => "isbn",
            KakaoTarget::Publisher => "publisher",
            KakaoTarget::Person => "person",
        }
    }
}

/// Kakao result ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum KakaoSort {
    #[default]
    Accuracy,
    Latest,
}

impl KakaoSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            KakaoSort::Accuracy => "accuracy",
            KakaoSort::Latest => "latest",
        }
    }
}

/// Kakao `/v3/search/book` request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KakaoSearchRequest {
    pub query: String,

    /// Restrict the search to one field; all fields when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<KakaoTarget>,

    #[serde(default)]
    pub sort: KakaoSort,

    /// Result page (1-50)
    #[serde(default = "default_start")]
    pub page: u32,

    /// Documents per page (1-50)
    #[serde(default = "default_page_size")]
    pub size: u32,
}

impl KakaoSearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            target: None,
            sort: KakaoSort::default(),
            page: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn target(mut self, target: KakaoTarget) -> Self {
        self.target = Some(target);
        self
    }

    pub fn sort(mut self, sort: KakaoSort) -> Self {
        self.sort = sort;
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn validate(&self) -> Result<(), RequestValidationError> {
        require_query(&self.query)?;
        require_range("page", self.page, 1, 50)?;
        require_range("size", self.size, 1, 50)?;
        Ok(())
    }
}

// ========== NAVER ==========

/// Naver result ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NaverSort {
    /// Similarity
    #[default]
    Sim,
    /// Publication date, newest first
    Date,
}

impl NaverSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            NaverSort::Sim => "sim",
            NaverSort::Date => "date",
        }
    }
}

/// Naver `/v1/search/book.json` request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NaverSearchRequest {
    #[serde(alias = "keyword")]
    pub query: String,

    /// Results per page (1-100)
    #[serde(default = "default_page_size")]
    pub display: u32,

    /// 1-based index of the first result (1-1000)
    #[serde(default = "default_start")]
    pub start: u32,

    #[serde(default)]
    pub sort: NaverSort,
}

impl NaverSearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            display: DEFAULT_PAGE_SIZE,
            start: 1,
            sort: NaverSort::default(),
        }
    }

    pub fn display(mut self, display: u32) -> Self {
        self.display = display;
        self
    }

    pub fn start(mut self, start: u32) -> Self {
        self.start = start;
        self
    }

    pub fn sort(mut self, sort: NaverSort) -> Self {
        self.sort = sort;
        self
    }

    pub fn validate(&self) -> Result<(), RequestValidationError> {
        require_query(&self.query)?;
        require_range("display", self.display, 1, 100)?;
        require_range("start", self.start, 1, 1000)?;
        Ok(())
    }
}

// ========== TAGGED REQUEST ==========

/// A search request addressed to exactly one provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum SearchRequest {
    Aladin(AladinSearchRequest),
    Kakao(KakaoSearchRequest),
    Naver(NaverSearchRequest),
}

impl SearchRequest {
    /// The provider this request is routed to
    pub fn provider(&self) -> ProviderId {
        match self {
            SearchRequest::Aladin(_) => ProviderId::Aladin,
            SearchRequest::Kakao(_) => ProviderId::Kakao,
            SearchRequest::Naver(_) => ProviderId::Naver,
        }
    }

    /// The free-text query string
    pub fn query(&self) -> &str {
        match self {
            SearchRequest::Aladin(r) => &r.query,
            SearchRequest::Kakao(r) => &r.query,
            SearchRequest::Naver(r) => &r.query,
        }
    }

    pub fn validate(&self) -> Result<(), RequestValidationError> {
        match self {
            SearchRequest::Aladin(r) => r.validate(),
            SearchRequest::Kakao(r) => r.validate(),
            SearchRequest::Naver(r) => r.validate(),
        }
    }
}

impl From<AladinSearchRequest> for SearchRequest {
    fn from(request: AladinSearchRequest) -> Self {
        SearchRequest::Aladin(request)
    }
}

impl From<KakaoSearchRequest> for SearchRequest {
    fn from(request: KakaoSearchRequest) -> Self {
        SearchRequest::Kakao(request)
    }
}

impl From<NaverSearchRequest> for SearchRequest {
    fn from(request: NaverSearchRequest) -> Self {
        SearchRequest::Naver(request)
    }
}
