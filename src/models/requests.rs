use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

use crate::models::domain::{AttributeFilter, CandidateProfile, JobDescription};

/// Query string of the suggestions endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuggestionsQuery {
    #[serde(rename = "filterKey", default)]
    pub filter_key: String,
    #[serde(default)]
    pub query: String,
}

/// Flat search body: `<category>` and `excluded<Category>` value lists plus paging
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SearchFilters {
    #[validate(range(min = 1))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 100))]
    #[serde(rename = "pageSize", default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(flatten)]
    pub values: BTreeMap<String, Vec<String>>,
}

/// Search body carrying the raw filter selection instead of translated keys
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SelectionSearchRequest {
    #[serde(default)]
    pub filters: Vec<AttributeFilter>,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 100))]
    #[serde(rename = "pageSize", default)]
    pub page_size: Option<u32>,
}

/// Request to synthesize a job description
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct GenerateJobRequest {
    #[validate(length(min = 1, message = "Prompt is required"))]
    #[serde(default)]
    pub prompt: String,
}

/// Request to score one profile against a job
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchRequest {
    pub profile: CandidateProfile,
    #[validate(nested)]
    pub job: JobDescription,
}
