// Core algorithm exports
pub mod catalog;
pub mod fallback;
pub mod filters;
pub mod mapper;
pub mod mock;

pub use catalog::{FilterCategory, FILTER_CATEGORIES};
pub use fallback::{
    build_search_params, create_filter_fallbacks, prioritize_filters, AttemptKind, FallbackSearch,
    PeopleSearch, SearchAttempt, SearchAttempts, SearchParams,
};
pub use filters::{build_search_filters, excluded_key, CategoryQuery, FilterSet, SearchQuery};
pub use mapper::{map_profile, map_profiles};
