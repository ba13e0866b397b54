//! Identifiers for the supported book search providers.

use serde::{Deserialize, Serialize};

/// The external provider a request is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Aladin,
    Kakao,
    Naver,
}

impl ProviderId {
    /// All providers, in routing order
    pub const ALL: [ProviderId; 3] = [ProviderId::Aladin, ProviderId::Kakao, ProviderId::Naver];

    /// Returns the display name of the provider
    pub fn name(&self) -> &'static str {
        match self {
            ProviderId::Aladin => "Aladin",
            ProviderId::Kakao => "Kakao",
            ProviderId::Naver => "Naver",
        }
    }

    /// Returns the provider identifier (used in routes and config keys)
    pub fn id(&self) -> &'static str {
        match self {
            ProviderId::Aladin => "aladin",
            ProviderId::Kakao => "kakao",
            ProviderId::Naver => "naver",
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
