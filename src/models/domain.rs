use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

/// Whether a selected filter value must be present or absent in results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    Include,
    Exclude,
}

/// A single user-selected attribute filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeFilter {
    pub id: String,
    pub value: String,
    #[serde(rename = "type")]
    pub filter_type: FilterType,
    pub category: String,
}

impl AttributeFilter {
    pub fn include(id: &str, value: &str, category: &str) -> Self {
        Self {
            id: id.to_string(),
            value: value.to_string(),
            filter_type: FilterType::Include,
            category: category.to_string(),
        }
    }

    pub fn exclude(id: &str, value: &str, category: &str) -> Self {
        Self {
            id: id.to_string(),
            value: value.to_string(),
            filter_type: FilterType::Exclude,
            category: category.to_string(),
        }
    }
}

/// Autocomplete entry for a filter category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

/// Work history entry of a candidate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub duration: String,
}

/// Education entry of a candidate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub school: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(rename = "fieldOfStudy", skip_serializing_if = "Option::is_none")]
    pub field_of_study: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years: Option<String>,
}

/// Canonical candidate record returned by every search path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub id: String,
    pub name: String,
    pub headline: String,
    pub location: String,
    #[serde(rename = "profileUrl")]
    pub profile_url: String,
    #[serde(rename = "profileImageUrl", skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    #[serde(rename = "currentCompany", skip_serializing_if = "Option::is_none")]
    pub current_company: Option<String>,
    #[serde(rename = "currentRole", skip_serializing_if = "Option::is_none")]
    pub current_role: Option<String>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<String>,
    #[serde(rename = "connectionDegree")]
    pub connection_degree: u32,
    #[serde(rename = "sharedConnections")]
    pub shared_connections: u32,
}

/// Pagination block of a search response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total: u64,
    pub page: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
    #[serde(rename = "hasMore")]
    pub has_more: bool,
}

/// Job description, either typed by the user or synthesized by the generator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct JobDescription {
    #[validate(length(min = 1, message = "Job title is required"))]
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "experienceLevel", default)]
    pub experience_level: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub description: String,
}

/// Filter dimensions the generator may emit for the talent search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Keywords,
    Location,
    Company,
    Industry,
    Title,
    Experience,
    Skills,
}

impl FilterKind {
    /// Parameter name used by the people-search endpoint
    pub fn as_param(&self) -> &'static str {
        match self {
            FilterKind::Keywords => "keywords",
            FilterKind::Location => "location",
            FilterKind::Company => "company",
            FilterKind::Industry => "industry",
            FilterKind::Title => "title",
            FilterKind::Experience => "experience",
            FilterKind::Skills => "skills",
        }
    }
}

/// Prioritized filter produced from a job description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFilter {
    #[serde(rename = "type")]
    pub kind: FilterKind,
    pub value: String,
    pub priority: u8,
}

impl GeneratedFilter {
    pub fn new(kind: FilterKind, value: &str, priority: u8) -> Self {
        Self {
            kind,
            value: value.to_string(),
            priority: priority.clamp(1, 10),
        }
    }
}

/// Location value to ordered alias list
pub type FilterFallbackMap = BTreeMap<String, Vec<String>>;

/// Filters ready for the people search: prioritized, with resolved IDs and aliases
#[derive(Debug, Clone, Default)]
pub struct OptimizedFilters {
    pub filters: Vec<GeneratedFilter>,
    pub filter_ids: BTreeMap<String, String>,
    pub fallbacks: FilterFallbackMap,
}

/// Outcome of scoring one candidate against a job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchAnalysis {
    pub score: u8,
    pub reasons: Vec<String>,
}
