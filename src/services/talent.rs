use std::collections::BTreeMap;

use crate::core::fallback::{build_search_params, create_filter_fallbacks, prioritize_filters, FallbackSearch};
use crate::core::filters::SearchQuery;
use crate::core::mock::generate_mock_results;
use crate::models::{CandidateProfile, FilterKind, GeneratedFilter, JobDescription, OptimizedFilters, SearchFilters};
use crate::services::generator::JobGenerator;
use crate::services::provider::ProviderClient;

/// Result of a talent search
#[derive(Debug, Clone)]
pub struct TalentOutcome {
    pub profiles: Vec<CandidateProfile>,
    pub filters: Vec<GeneratedFilter>,
    pub mock: bool,
}

/// Job description in, candidate profiles out
///
/// Works with whatever collaborators are configured: without a generator the
/// filters are derived from the job fields, without a provider the results are
/// mock profiles.
pub struct TalentSearch<'a> {
    provider: Option<&'a ProviderClient>,
    generator: Option<&'a JobGenerator>,
    fallback: FallbackSearch,
}

impl<'a> TalentSearch<'a> {
    pub fn new(
        provider: Option<&'a ProviderClient>,
        generator: Option<&'a JobGenerator>,
        fallback: FallbackSearch,
    ) -> Self {
        Self {
            provider,
            generator,
            fallback,
        }
    }

    pub async fn generate_filters(&self, job: &JobDescription) -> Vec<GeneratedFilter> {
        if let Some(generator) = self.generator {
            match generator.generate_filters(job).await {
                Ok(filters) if !filters.is_empty() => return filters,
                Ok(_) => tracing::warn!("Generator returned no filters, deriving them from the job"),
                Err(e) => tracing::warn!("Filter generation failed, deriving them from the job: {}", e),
            }
        }

        heuristic_filters(job)
    }

    /// Prioritize, build location fallbacks and resolve provider IDs
    pub async fn optimize_filters(&self, job: &JobDescription) -> OptimizedFilters {
        let filters = prioritize_filters(&self.generate_filters(job).await);
        let fallbacks = create_filter_fallbacks(&filters);

        let mut optimized = OptimizedFilters {
            filters,
            filter_ids: BTreeMap::new(),
            fallbacks,
        };

        if let Some(provider) = self.provider {
            match provider.search_filters(&build_search_params(&optimized)).await {
                Ok(ids) => optimized.filter_ids = ids,
                Err(e) => tracing::warn!("Filter ID lookup failed, searching by value: {}", e),
            }
        }

        optimized
    }

    pub async fn search(&self, job: &JobDescription) -> TalentOutcome {
        let optimized = self.optimize_filters(job).await;

        match self.provider {
            Some(provider) => {
                let profiles = self.fallback.run(provider, &optimized).await;
                tracing::info!("Talent search for '{}' returned {} profiles", job.title, profiles.len());
                TalentOutcome {
                    profiles,
                    filters: optimized.filters,
                    mock: false,
                }
            }
            None => {
                tracing::info!("Provider not configured, returning mock profiles for '{}'", job.title);
                let mock_filters = mock_filters_for(&optimized, self.fallback.min_results() as u32);
                TalentOutcome {
                    profiles: generate_mock_results(&mock_filters),
                    filters: optimized.filters,
                    mock: true,
                }
            }
        }
    }
}

/// Filters taken straight from the job fields
pub fn heuristic_filters(job: &JobDescription) -> Vec<GeneratedFilter> {
    let mut filters = Vec::new();

    if !job.title.trim().is_empty() {
        filters.push(GeneratedFilter::new(FilterKind::Title, job.title.trim(), 10));
    }
    if !job.location.trim().is_empty() {
        filters.push(GeneratedFilter::new(FilterKind::Location, job.location.trim(), 9));
    }
    for skill in job.skills.iter().filter(|s| !s.trim().is_empty()).take(3) {
        filters.push(GeneratedFilter::new(FilterKind::Skills, skill.trim(), 7));
    }
    if !job.experience_level.trim().is_empty() {
        filters.push(GeneratedFilter::new(FilterKind::Experience, job.experience_level.trim(), 6));
    }

    filters
}

/// Seed mock results with the highest-priority title, location and company
fn mock_filters_for(optimized: &OptimizedFilters, page_size: u32) -> SearchQuery {
    let mut values = BTreeMap::new();
    let seeds = [
        (FilterKind::Title, "jobTitle"),
        (FilterKind::Location, "location"),
        (FilterKind::Company, "company"),
    ];

    for (kind, category) in seeds {
        if let Some(filter) = optimized.filters.iter().find(|f| f.kind == kind) {
            values.insert(category.to_string(), vec![filter.value.clone()]);
        }
    }

    SearchFilters {
        page: Some(1),
        page_size: Some(page_size.max(1)),
        values,
    }
    .to_query()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> JobDescription {
        JobDescription {
            title: "Backend Engineer".to_string(),
            location: "Bangalore".to_string(),
            experience_level: "Senior".to_string(),
            skills: vec!["Rust".into(), "Kafka".into(), "Postgres".into(), "AWS".into()],
            description: "Build services".to_string(),
        }
    }

    #[test]
    fn test_heuristic_filters() {
        let filters = heuristic_filters(&job());

        assert_eq!(filters.len(), 6);
        assert_eq!(filters[0], GeneratedFilter::new(FilterKind::Title, "Backend Engineer", 10));
        assert_eq!(filters[1].kind, FilterKind::Location);
        assert_eq!(
            filters.iter().filter(|f| f.kind == FilterKind::Skills).count(),
            3
        );
        assert_eq!(filters[5].priority, 6);
    }

    #[tokio::test]
    async fn test_search_without_collaborators_is_mock() {
        let search = TalentSearch::new(None, None, FallbackSearch::default());

        let outcome = search.search(&job()).await;

        assert!(outcome.mock);
        assert_eq!(outcome.profiles.len(), 10);
        assert_eq!(outcome.profiles[0].headline, "Backend Engineer");
        assert_eq!(outcome.profiles[0].location, "Bangalore");
        assert_eq!(outcome.filters[0].kind, FilterKind::Title);
    }

    #[tokio::test]
    async fn test_optimize_without_provider_keeps_fallbacks() {
        let search = TalentSearch::new(None, None, FallbackSearch::default());

        let optimized = search.optimize_filters(&job()).await;

        assert!(optimized.filter_ids.is_empty());
        assert_eq!(optimized.fallbacks.get("Bangalore").unwrap()[0], "Bengaluru");
    }
}
