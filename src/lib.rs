//! Talent Scout - candidate search proxy
//!
//! This library turns user-selected attribute filters into queries for a
//! third-party people-data API, throttles outbound calls, retries thin
//! searches with location aliases and normalizes whatever the API returns.
//! Every path degrades to deterministic mock data when the API is unavailable.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{build_search_filters, map_profile, FallbackSearch, FilterSet, SearchQuery};
pub use models::{AttributeFilter, CandidateProfile, FilterType, JobDescription, SearchFilters};
pub use services::{ProviderClient, ProviderError, RateLimiter};
