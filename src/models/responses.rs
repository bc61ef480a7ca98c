use serde::{Deserialize, Serialize};

use crate::models::domain::{CandidateProfile, Pagination, Suggestion};

/// Response for the suggestions endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionsResponse {
    pub success: bool,
    pub suggestions: Vec<Suggestion>,
    #[serde(rename = "_fallback", default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<bool>,
    #[serde(rename = "_error", default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response for the filter search endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    pub results: Vec<CandidateProfile>,
    pub pagination: Pagination,
    #[serde(rename = "_mock", default, skip_serializing_if = "Option::is_none")]
    pub mock: Option<bool>,
    #[serde(rename = "_fallback", default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<bool>,
    #[serde(rename = "_error", default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response for a single profile lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub profile: CandidateProfile,
    #[serde(rename = "_mock", default, skip_serializing_if = "Option::is_none")]
    pub mock: Option<bool>,
    #[serde(rename = "_fallback", default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<bool>,
    #[serde(rename = "_error", default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response for the AI-assisted talent search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TalentSearchResponse {
    pub profiles: Vec<CandidateProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "_mock", default, skip_serializing_if = "Option::is_none")]
    pub mock: Option<bool>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "providerConfigured")]
    pub provider_configured: bool,
    #[serde(rename = "generatorConfigured")]
    pub generator_configured: bool,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub details: String,
}

impl ErrorResponse {
    pub fn new(error: &str, details: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.to_string(),
            details: details.into(),
        }
    }
}
