//! Provider response schemas.
//!
//! These structs keep each provider's native field names so a decoded
//! response serializes back to the JSON the provider sent. Nothing is
//! normalized across providers. Fields without a typed counterpart are
//! kept in an `extra` map and written back unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ProviderId;

// ========== ALADIN ==========

/// Aladin `ItemSearch` response (`output=JS`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AladinSearchResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pub_date: Option<String>,
    pub total_results: u64,
    pub start_index: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items_per_page: Option<u32>,
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_category_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_category_name: Option<String>,
    pub item: Vec<AladinItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single Aladin catalogue item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AladinItem {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pub_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn13: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_sales: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_standard: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mall_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mileage: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_point: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adult: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_price: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_review_rank: Option<u32>,
    /// Bestseller rank, `0` when unranked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_rank: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_info: Option<AladinSeriesInfo>,
    /// Mall-specific extras; the shape varies with `searchTarget`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_info: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AladinSeriesInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_name: Option<String>,
}

// ========== KAKAO ==========

/// Kakao `/v3/search/book` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KakaoSearchResponse {
    pub documents: Vec<KakaoDocument>,
    pub meta: KakaoMeta,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KakaoDocument {
    pub title: String,
    #[serde(default)]
    pub contents: String,
    pub url: String,
    /// Space separated ISBN10 and ISBN13
    pub isbn: String,
    /// ISO 8601 publication timestamp
    #[serde(default)]
    pub datetime: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub translators: Vec<String>,
    pub price: i64,
    /// `-1` when the book is not on sale
    pub sale_price: i64,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KakaoMeta {
    pub total_count: u64,
    pub pageable_count: u64,
    pub is_end: bool,
}

// ========== NAVER ==========

/// Naver `/v1/search/book.json` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NaverSearchResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_build_date: Option<String>,
    pub total: u64,
    pub start: u32,
    pub display: u32,
    pub items: Vec<NaverItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NaverItem {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// List price as a decimal string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Sale price as a decimal string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    /// `yyyyMMdd`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pubdate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ========== TAGGED RESULT ==========

/// A decoded provider response, tagged like the request that produced it
///
/// Serializes as the provider's native JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SearchResult {
    Aladin(AladinSearchResponse),
    Kakao(KakaoSearchResponse),
    Naver(NaverSearchResponse),
}

impl SearchResult {
    pub fn provider(&self) -> ProviderId {
        match self {
            SearchResult::Aladin(_) => ProviderId::Aladin,
            SearchResult::Kakao(_) => ProviderId::Kakao,
            SearchResult::Naver(_) => ProviderId::Naver,
        }
    }

    /// Total number of matches the provider reports
    pub fn total(&self) -> u64 {
        match self {
            SearchResult::Aladin(r) => r.total_results,
            SearchResult::Kakao(r) => r.meta.total_count,
            SearchResult::Naver(r) => r.total,
        }
    }

    /// Number of items on this page
    pub fn item_count(&self) -> usize {
        match self {
            SearchResult::Aladin(r) => r.item.len(),
            SearchResult::Kakao(r) => r.documents.len(),
            SearchResult::Naver(r) => r.items.len(),
        }
    }

    /// End-of-results flag, only Kakao reports one
    pub fn is_end(&self) -> Option<bool> {
        match self {
            SearchResult::Kakao(r) => Some(r.meta.is_end),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aladin_response_decodes_native_payload() {
        let json = r#"{
            "version": "20131101",
            "logo": "http://image.aladin.co.kr/img/header/2003/aladin_logo_new.gif",
            "title": "Aladin search - little prince",
            "link": "http://www.aladin.co.kr/search/wsearchresult.aspx",
            "pubDate": "Mon, 01 Jan 2024 00:00:00 GMT",
            "totalResults": 1,
            "startIndex": 1,
            "itemsPerPage": 10,
            "query": "little prince",
            "searchCategoryId": 0,
            "searchCategoryName": "All",
            "item": [{
                "title": "The Little Prince",
                "author": "Antoine de Saint-Exupery",
                "isbn": "8937460017",
                "isbn13": "9788937460012",
                "itemId": 123456,
                "priceSales": 10000,
                "priceStandard": 12000,
                "adult": false,
                "customerReviewRank": 9,
                "seriesInfo": null,
                "subInfo": {}
            }]
        }"#;

        let response: AladinSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.total_results, 1);
        assert_eq!(response.item[0].item_id, Some(123456));
        assert_eq!(response.item[0].price_sales, Some(10000));
        assert_eq!(response.item[0].series_info, None);
        assert_eq!(response.item[0].sub_info, Some(serde_json::json!({})));
        assert_eq!(response.item[0].publisher, None);
    }

    #[test]
    fn test_aladin_error_payload_does_not_decode() {
        let json = r#"{"errorCode": 3, "errorMessage": "invalid ttbkey"}"#;
        assert!(serde_json::from_str::<AladinSearchResponse>(json).is_err());
    }

    #[test]
    fn test_kakao_response_serializes_native_names() {
        let json = r#"{
            "documents": [{
                "title": "Kotlin in Action",
                "contents": "",
                "url": "https://search.daum.net/search?q=kotlin",
                "isbn": "8960773433 9788960773431",
                "datetime": "2017-10-31T00:00:00.000+09:00",
                "authors": ["Dmitry Jemerov", "Svetlana Isakova"],
                "publisher": "Acorn",
                "translators": ["Hyunsok Oh"],
                "price": 36000,
                "sale_price": 32400,
                "thumbnail": "",
                "status": "on sale"
            }],
            "meta": {"total_count": 100, "pageable_count": 50, "is_end": false}
        }"#;

        let response: KakaoSearchResponse = serde_json::from_str(json).unwrap();
        let result = SearchResult::Kakao(response);

        assert_eq!(result.total(), 100);
        assert_eq!(result.is_end(), Some(false));

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["meta"]["pageable_count"], 50);
        assert_eq!(value["documents"][0]["sale_price"], 32400);
        assert_eq!(value["documents"][0]["authors"][1], "Svetlana Isakova");
    }

    #[test]
    fn test_naver_response_keeps_absent_fields_absent() {
        let json = r#"{
            "lastBuildDate": "Mon, 01 Jan 2024 00:00:00 +0900",
            "total": 1, "start": 1, "display": 10,
            "items": [{"title": "Spring Boot in Practice", "isbn": "9791169210034"}]
        }"#;

        let response: NaverSearchResponse = serde_json::from_str(json).unwrap();
        let value = serde_json::to_value(SearchResult::Naver(response)).unwrap();

        assert_eq!(value["lastBuildDate"], "Mon, 01 Jan 2024 00:00:00 +0900");
        assert!(value["items"][0].get("discount").is_none());
        assert_eq!(value["items"][0]["isbn"], "9791169210034");
    }

    #[test]
    fn test_naver_success_serializes_back_to_the_provider_json() {
        let native: Value = serde_json::json!({
            "lastBuildDate": "Mon, 01 Jan 2024 00:00:00 +0900",
            "total": 1, "start": 1, "display": 10,
            "items": [{
                "title": "Spring Boot in Practice",
                "price": "33000",
                "discount": "29700",
                "isbn": "9791169210034",
                "rating": "4.5"
            }]
        });

        let response: NaverSearchResponse = serde_json::from_value(native.clone()).unwrap();
        assert_eq!(response.items[0].price.as_deref(), Some("33000"));

        let value = serde_json::to_value(SearchResult::Naver(response)).unwrap();
        assert_eq!(value, native);
    }

    #[test]
    fn test_aladin_success_serializes_back_to_the_provider_json() {
        let native: Value = serde_json::json!({
            "version": "20131101",
            "totalResults": 1,
            "startIndex": 1,
            "query": "clean code",
            "item": [{
                "title": "Clean Code",
                "isbn13": "9788966260959",
                "priceSales": 29700,
                "bestRank": 3,
                "searchTarget": "Book",
                "categoryIdList": [1, 2]
            }],
            "searchCategoryId": 0
        });

        let response: AladinSearchResponse = serde_json::from_value(native.clone()).unwrap();
        assert_eq!(response.item[0].best_rank, Some(3));
        assert_eq!(response.item[0].search_target.as_deref(), Some("Book"));
        assert!(response.item[0].extra.contains_key("categoryIdList"));

        let value = serde_json::to_value(SearchResult::Aladin(response)).unwrap();
        assert_eq!(value, native);
    }

    #[test]
    fn test_kakao_unknown_fields_round_trip() {
        let native: Value = serde_json::json!({
            "documents": [{
                "title": "Kotlin in Action",
                "contents": "",
                "url": "https://search.daum.net/search?q=kotlin",
                "isbn": "8960773433 9788960773431",
                "datetime": "2017-10-31T00:00:00.000+09:00",
                "authors": ["Dmitry Jemerov"],
                "publisher": "Acorn",
                "translators": [],
                "price": 36000,
                "sale_price": 32400,
                "thumbnail": "",
                "status": "on sale",
                "ebook": true
            }],
            "meta": {"total_count": 1, "pageable_count": 1, "is_end": true},
            "same_name": null
        });

        let response: KakaoSearchResponse = serde_json::from_value(native.clone()).unwrap();
        let value = serde_json::to_value(SearchResult::Kakao(response)).unwrap();
        assert_eq!(value, native);
    }
}
