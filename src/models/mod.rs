// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AttributeFilter, CandidateProfile, Education, Experience, FilterFallbackMap, FilterKind,
    FilterType, GeneratedFilter, JobDescription, MatchAnalysis, OptimizedFilters, Pagination,
    Suggestion,
};
pub use requests::{GenerateJobRequest, MatchRequest, SearchFilters, SelectionSearchRequest, SuggestionsQuery};
pub use responses::{
    ErrorResponse, HealthResponse, ProfileResponse, SearchResponse, SuggestionsResponse,
    TalentSearchResponse,
};
