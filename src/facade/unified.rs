//! Results of fanning one keyword out to several providers.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{CallOutcome, ProviderFailure, ProviderId, SearchResult};

/// Which providers a multi-provider search should query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderSelection {
    pub aladin: bool,
    pub kakao: bool,
    pub naver: bool,
}

impl Default for ProviderSelection {
    fn default() -> Self {
        Self::all()
    }
}

impl ProviderSelection {
    pub fn all() -> Self {
        Self {
            aladin: true,
            kakao: true,
            naver: true,
        }
    }

    pub fn none() -> Self {
        Self {
            aladin: false,
            kakao: false,
            naver: false,
        }
    }

    /// Select a single provider
    pub fn only(provider: ProviderId) -> Self {
        Self::none().with(provider, true)
    }

    pub fn with(mut self, provider: ProviderId, included: bool) -> Self {
        match provider {
            ProviderId::Aladin => self.aladin = included,
            ProviderId::Kakao => self.kakao = included,
            ProviderId::Naver => self.naver = included,
        }
        self
    }

    pub fn includes(&self, provider: ProviderId) -> bool {
        match provider {
            ProviderId::Aladin => self.aladin,
            ProviderId::Kakao => self.kakao,
            ProviderId::Naver => self.naver,
        }
    }
}

/// One provider's share of a unified search
///
/// Serializes as `{"status": "success", "data": <native response>}` or
/// `{"status": "failure", "data": <failure>}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "lowercase")]
pub enum ProviderReport {
    Success(SearchResult),
    Failure(ProviderFailure),
}

impl ProviderReport {
    pub fn is_success(&self) -> bool {
        matches!(self, ProviderReport::Success(_))
    }

    pub fn result(&self) -> Option<&SearchResult> {
        match self {
            ProviderReport::Success(result) => Some(result),
            ProviderReport::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&ProviderFailure> {
        match self {
            ProviderReport::Success(_) => None,
            ProviderReport::Failure(failure) => Some(failure),
        }
    }
}

impl From<CallOutcome> for ProviderReport {
    fn from(outcome: CallOutcome) -> Self {
        match outcome {
            Ok(result) => ProviderReport::Success(result),
            Err(failure) => ProviderReport::Failure(failure),
        }
    }
}

/// Every provider's outcome for one keyword, side by side
///
/// Nothing is merged or ranked; a provider that was not queried is `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedSearchResult {
    pub keyword: String,
    pub aladin: Option<ProviderReport>,
    pub kakao: Option<ProviderReport>,
    pub naver: Option<ProviderReport>,
    pub searched_at: DateTime<Utc>,
}

impl UnifiedSearchResult {
    /// Reports in routing order, paired with their provider
    pub fn reports(&self) -> impl Iterator<Item = (ProviderId, Option<&ProviderReport>)> {
        [
            (ProviderId::Aladin, self.aladin.as_ref()),
            (ProviderId::Kakao, self.kakao.as_ref()),
            (ProviderId::Naver, self.naver.as_ref()),
        ]
        .into_iter()
    }

    pub fn get(&self, provider: ProviderId) -> Option<&ProviderReport> {
        match provider {
            ProviderId::Aladin => self.aladin.as_ref(),
            ProviderId::Kakao => self.kakao.as_ref(),
            ProviderId::Naver => self.naver.as_ref(),
        }
    }

    /// True when at least one provider returned a decoded response
    pub fn has_any_results(&self) -> bool {
        self.successful_count() > 0
    }

    pub fn successful_count(&self) -> usize {
        self.reports()
            .filter(|(_, report)| report.is_some_and(ProviderReport::is_success))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.reports()
            .filter(|(_, report)| report.is_some_and(|r| !r.is_success()))
            .count()
    }

    /// Sum of the match totals reported by successful providers
    pub fn total_book_count(&self) -> u64 {
        self.reports()
            .filter_map(|(_, report)| report.and_then(ProviderReport::result))
            .map(SearchResult::total)
            .sum()
    }
}

/// Summary numbers for a keyword across all providers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStatistics {
    pub total_results: u64,
    pub successful_apis: usize,
    pub failed_apis: usize,
    pub search_keyword: String,
    /// Percentage of queried providers that succeeded, 0 when none were queried
    pub success_rate: f64,
}

impl From<&UnifiedSearchResult> for SearchStatistics {
    fn from(result: &UnifiedSearchResult) -> Self {
        let successful_apis = result.successful_count();
        let failed_apis = result.failed_count();
        let queried = successful_apis + failed_apis;
        let success_rate = if queried > 0 {
            successful_apis as f64 / queried as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total_results: result.total_book_count(),
            successful_apis,
            failed_apis,
            search_keyword: result.keyword.clone(),
            success_rate,
        }
    }
}

/// Reachability of a single provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ServiceStatus {
    Up,
    Down,
}

impl ServiceStatus {
    fn from_report(report: Option<&ProviderReport>) -> Self {
        match report {
            Some(report) if report.is_success() => ServiceStatus::Up,
            _ => ServiceStatus::Down,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceStatuses {
    pub aladin: ServiceStatus,
    pub kakao: ServiceStatus,
    pub naver: ServiceStatus,
}

/// Health of the provider set, probed with a live search
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    /// `UP` when at least one provider answered
    pub status: ServiceStatus,
    pub timestamp: DateTime<Utc>,
    pub services: ServiceStatuses,
    pub successful_apis: usize,
    pub total_apis: usize,
    pub search_keyword: String,
}

impl From<&UnifiedSearchResult> for HealthReport {
    fn from(result: &UnifiedSearchResult) -> Self {
        let status = if result.has_any_results() {
            ServiceStatus::Up
        } else {
            ServiceStatus::Down
        };

        Self {
            status,
            timestamp: result.searched_at,
            services: ServiceStatuses {
                aladin: ServiceStatus::from_report(result.aladin.as_ref()),
                kakao: ServiceStatus::from_report(result.kakao.as_ref()),
                naver: ServiceStatus::from_report(result.naver.as_ref()),
            },
            successful_apis: result.successful_count(),
            total_apis: ProviderId::ALL.len(),
            search_keyword: result.keyword.clone(),
        }
    }
}
