use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;
use std::future::Future;

use crate::core::mapper::map_profiles;
use crate::models::{CandidateProfile, FilterFallbackMap, FilterKind, GeneratedFilter, OptimizedFilters};

/// Query parameters of a single people search
pub type SearchParams = BTreeMap<String, String>;

/// Result count a search must reach before the alias scan stops
pub const DEFAULT_MIN_RESULTS: usize = 10;

/// Known spellings of the same city, tried before the remote variants
const LOCATION_SYNONYMS: &[(&str, &[&str])] = &[
    ("Bangalore", &["Bengaluru"]),
    ("Bengaluru", &["Bangalore"]),
    ("Mumbai", &["Bombay"]),
    ("Chennai", &["Madras"]),
    ("New York", &["NYC", "New York City"]),
    ("San Francisco", &["SF", "Bay Area"]),
];

/// Upstream that runs a people search for a parameter set
pub trait PeopleSearch {
    type Error: Display;

    fn search_people(
        &self,
        params: &SearchParams,
    ) -> impl Future<Output = Result<Vec<Value>, Self::Error>> + Send;
}

/// Sort by priority, highest first; ties keep their original order
pub fn prioritize_filters(filters: &[GeneratedFilter]) -> Vec<GeneratedFilter> {
    let mut sorted = filters.to_vec();
    sorted.sort_by(|a, b| b.priority.cmp(&a.priority));
    sorted
}

/// Alias list for every location filter
pub fn create_filter_fallbacks(filters: &[GeneratedFilter]) -> FilterFallbackMap {
    let mut fallbacks = FilterFallbackMap::new();

    for filter in filters.iter().filter(|f| f.kind == FilterKind::Location) {
        let location = filter.value.as_str();
        let mut aliases: Vec<String> = LOCATION_SYNONYMS
            .iter()
            .filter(|(canonical, _)| *canonical == location)
            .flat_map(|(_, synonyms)| synonyms.iter().map(|s| s.to_string()))
            .collect();

        aliases.push(format!("Remote {}", location));
        aliases.push(format!("{} Remote", location));

        fallbacks.insert(location.to_string(), aliases);
    }

    fallbacks
}

/// Parameters of the primary search
///
/// The first filter of each type wins, so the highest-priority value is sent
/// rather than the last one listed. A resolved ID replaces the raw value.
pub fn build_search_params(optimized: &OptimizedFilters) -> SearchParams {
    let mut params = SearchParams::new();
    let mut seen = Vec::new();

    for filter in &optimized.filters {
        let kind = filter.kind.as_param();
        if seen.contains(&kind) {
            continue;
        }
        seen.push(kind);

        match optimized.filter_ids.get(kind) {
            Some(id) => params.insert(format!("{}Id", kind), id.clone()),
            None => params.insert(kind.to_string(), filter.value.clone()),
        };
    }

    params
}

/// Where an attempt's parameters came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptKind {
    Primary,
    LocationAlias { original: String, alias: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchAttempt {
    pub kind: AttemptKind,
    pub params: SearchParams,
}

/// Lazy sequence of parameter sets: the primary first, then every location
/// alias in filter order and alias order
pub struct SearchAttempts<'a> {
    primary: Option<SearchParams>,
    base: SearchParams,
    aliases: std::vec::IntoIter<(&'a str, &'a str)>,
}

impl<'a> SearchAttempts<'a> {
    pub fn new(optimized: &'a OptimizedFilters) -> Self {
        let base = build_search_params(optimized);

        // each alias is tried once, even when a location value is repeated
        let mut tried = BTreeSet::new();
        let aliases: Vec<(&str, &str)> = optimized
            .filters
            .iter()
            .filter(|f| f.kind == FilterKind::Location)
            .filter_map(|f| {
                optimized
                    .fallbacks
                    .get(&f.value)
                    .map(|list| (f.value.as_str(), list))
            })
            .flat_map(|(original, list)| list.iter().map(move |alias| (original, alias.as_str())))
            .filter(|(_, alias)| tried.insert(*alias))
            .collect();

        Self {
            primary: Some(base.clone()),
            base,
            aliases: aliases.into_iter(),
        }
    }
}

impl Iterator for SearchAttempts<'_> {
    type Item = SearchAttempt;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(params) = self.primary.take() {
            return Some(SearchAttempt {
                kind: AttemptKind::Primary,
                params,
            });
        }

        let (original, alias) = self.aliases.next()?;
        let mut params = self.base.clone();
        params.insert("location".to_string(), alias.to_string());
        // a resolved ID belongs to the primary spelling only
        params.remove("locationId");

        Some(SearchAttempt {
            kind: AttemptKind::LocationAlias {
                original: original.to_string(),
                alias: alias.to_string(),
            },
            params,
        })
    }
}

/// Runs the primary search and walks location aliases until enough results come back
#[derive(Debug, Clone, Copy)]
pub struct FallbackSearch {
    min_results: usize,
}

impl FallbackSearch {
    pub fn new(min_results: usize) -> Self {
        Self { min_results }
    }

    pub fn min_results(&self) -> usize {
        self.min_results
    }

    pub async fn run<S: PeopleSearch>(
        &self,
        search: &S,
        optimized: &OptimizedFilters,
    ) -> Vec<CandidateProfile> {
        let mut last_success: Option<Vec<Value>> = None;

        for attempt in SearchAttempts::new(optimized) {
            match search.search_people(&attempt.params).await {
                Ok(records) if records.len() >= self.min_results => {
                    tracing::info!(
                        "Search attempt {:?} returned {} profiles",
                        attempt.kind,
                        records.len()
                    );
                    return map_profiles(&records);
                }
                Ok(records) => {
                    tracing::debug!(
                        "Search attempt {:?} returned {} profiles (< {})",
                        attempt.kind,
                        records.len(),
                        self.min_results
                    );
                    last_success = Some(records);
                }
                Err(e) => {
                    tracing::warn!("Search attempt {:?} failed: {}", attempt.kind, e);
                }
            }
        }

        last_success
            .map(|records| map_profiles(&records))
            .unwrap_or_default()
    }
}

impl Default for FallbackSearch {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_RESULTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    /// Scripted upstream keyed by the `location` parameter
    struct ScriptedSearch {
        responses: BTreeMap<String, Result<usize, String>>,
        calls: Mutex<Vec<SearchParams>>,
    }

    impl ScriptedSearch {
        fn new(responses: &[(&str, Result<usize, &str>)]) -> Self {
            Self {
                responses: responses
                    .iter()
                    .map(|(k, v)| (k.to_string(), (*v).map_err(|e| e.to_string())))
                    .collect(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<SearchParams> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl PeopleSearch for ScriptedSearch {
        type Error = String;

        async fn search_people(&self, params: &SearchParams) -> Result<Vec<Value>, String> {
            self.calls.lock().unwrap().push(params.clone());
            let key = params
                .get("location")
                .cloned()
                .unwrap_or_else(|| "<id>".to_string());
            match self.responses.get(&key) {
                Some(Ok(n)) => Ok((0..*n)
                    .map(|i| json!({"id": format!("{}-{}", key, i), "name": key}))
                    .collect()),
                Some(Err(e)) => Err(e.clone()),
                None => Ok(Vec::new()),
            }
        }
    }

    fn optimized(location: &str) -> OptimizedFilters {
        let filters = prioritize_filters(&[
            GeneratedFilter::new(FilterKind::Title, "Backend Engineer", 10),
            GeneratedFilter::new(FilterKind::Location, location, 9),
        ]);
        let fallbacks = create_filter_fallbacks(&filters);
        OptimizedFilters {
            filters,
            filter_ids: BTreeMap::new(),
            fallbacks,
        }
    }

    #[test]
    fn test_prioritize_is_stable_descending() {
        let sorted = prioritize_filters(&[
            GeneratedFilter::new(FilterKind::Skills, "Rust", 5),
            GeneratedFilter::new(FilterKind::Title, "Engineer", 9),
            GeneratedFilter::new(FilterKind::Skills, "Go", 5),
        ]);

        let values: Vec<_> = sorted.iter().map(|f| f.value.as_str()).collect();
        assert_eq!(values, vec!["Engineer", "Rust", "Go"]);
    }

    #[test]
    fn test_fallbacks_include_synonyms_then_remote() {
        let fallbacks = create_filter_fallbacks(&[GeneratedFilter::new(
            FilterKind::Location,
            "New York",
            8,
        )]);

        assert_eq!(
            fallbacks.get("New York").unwrap(),
            &vec!["NYC", "New York City", "Remote New York", "New York Remote"]
        );

        let unknown = create_filter_fallbacks(&[GeneratedFilter::new(FilterKind::Location, "Oslo", 8)]);
        assert_eq!(unknown.get("Oslo").unwrap(), &vec!["Remote Oslo", "Oslo Remote"]);
    }

    #[test]
    fn test_attempts_order_and_location_id_dropped() {
        let mut opt = optimized("Bangalore");
        opt.filter_ids.insert("location".to_string(), "urn:loc:42".to_string());

        let attempts: Vec<SearchAttempt> = SearchAttempts::new(&opt).collect();

        assert_eq!(attempts.len(), 4);
        assert_eq!(attempts[0].kind, AttemptKind::Primary);
        assert_eq!(attempts[0].params.get("locationId").map(String::as_str), Some("urn:loc:42"));
        assert!(attempts[0].params.get("location").is_none());

        assert_eq!(
            attempts[1].kind,
            AttemptKind::LocationAlias {
                original: "Bangalore".to_string(),
                alias: "Bengaluru".to_string()
            }
        );
        for attempt in &attempts[1..] {
            assert!(attempt.params.get("locationId").is_none());
            assert_eq!(attempt.params.get("title").map(String::as_str), Some("Backend Engineer"));
        }
        assert_eq!(attempts[3].params.get("location").map(String::as_str), Some("Bangalore Remote"));
    }

    #[test]
    fn test_repeated_location_aliases_are_tried_once() {
        let filters = prioritize_filters(&[
            GeneratedFilter::new(FilterKind::Location, "Mumbai", 9),
            GeneratedFilter::new(FilterKind::Title, "SRE", 8),
            GeneratedFilter::new(FilterKind::Location, "Mumbai", 4),
        ]);
        let opt = OptimizedFilters {
            fallbacks: create_filter_fallbacks(&filters),
            filters,
            filter_ids: BTreeMap::new(),
        };

        let locations: Vec<String> = SearchAttempts::new(&opt)
            .map(|a| a.params["location"].clone())
            .collect();

        assert_eq!(locations, vec!["Mumbai", "Bombay", "Remote Mumbai", "Mumbai Remote"]);
    }

    #[tokio::test]
    async fn test_thin_scan_with_repeated_location_calls_each_alias_once() {
        let search = ScriptedSearch::new(&[("Mumbai", Ok(1)), ("Bombay", Ok(2))]);
        let filters = prioritize_filters(&[
            GeneratedFilter::new(FilterKind::Location, "Mumbai", 9),
            GeneratedFilter::new(FilterKind::Location, "Mumbai", 4),
        ]);
        let opt = OptimizedFilters {
            fallbacks: create_filter_fallbacks(&filters),
            filters,
            filter_ids: BTreeMap::new(),
        };

        FallbackSearch::default().run(&search, &opt).await;

        let calls: Vec<String> = search
            .calls()
            .iter()
            .map(|p| p["location"].clone())
            .collect();
        assert_eq!(calls, vec!["Mumbai", "Bombay", "Remote Mumbai", "Mumbai Remote"]);
    }

    #[test]
    fn test_first_filter_of_a_type_wins() {
        let opt = OptimizedFilters {
            filters: vec![
                GeneratedFilter::new(FilterKind::Skills, "Rust", 8),
                GeneratedFilter::new(FilterKind::Skills, "Go", 7),
            ],
            ..Default::default()
        };

        let params = build_search_params(&opt);
        assert_eq!(params.get("skills").map(String::as_str), Some("Rust"));
    }

    #[tokio::test]
    async fn test_primary_above_threshold_stops() {
        let search = ScriptedSearch::new(&[("Bangalore", Ok(12))]);

        let profiles = FallbackSearch::default().run(&search, &optimized("Bangalore")).await;

        assert_eq!(profiles.len(), 12);
        assert_eq!(search.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_alias_results_replace_thin_primary() {
        let search = ScriptedSearch::new(&[("Bangalore", Ok(3)), ("Bengaluru", Ok(10))]);

        let profiles = FallbackSearch::default().run(&search, &optimized("Bangalore")).await;

        assert_eq!(profiles.len(), 10);
        assert!(profiles.iter().all(|p| p.name == "Bengaluru"));
        assert_eq!(search.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_alias_failure_is_skipped() {
        let search = ScriptedSearch::new(&[
            ("Mumbai", Ok(2)),
            ("Bombay", Err("503 upstream")),
            ("Remote Mumbai", Ok(11)),
        ]);

        let profiles = FallbackSearch::default().run(&search, &optimized("Mumbai")).await;

        assert_eq!(profiles.len(), 11);
        assert_eq!(search.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_exhausted_scan_returns_last_success() {
        let search = ScriptedSearch::new(&[
            ("Chennai", Ok(4)),
            ("Madras", Ok(6)),
            ("Remote Chennai", Err("timeout")),
            ("Chennai Remote", Err("timeout")),
        ]);

        let profiles = FallbackSearch::default().run(&search, &optimized("Chennai")).await;

        assert_eq!(profiles.len(), 6);
        assert!(profiles.iter().all(|p| p.name == "Madras"));
        assert_eq!(search.calls().len(), 4);
    }

    #[tokio::test]
    async fn test_all_failures_return_empty() {
        let search = ScriptedSearch::new(&[
            ("Oslo", Err("down")),
            ("Remote Oslo", Err("down")),
            ("Oslo Remote", Err("down")),
        ]);

        let profiles = FallbackSearch::default().run(&search, &optimized("Oslo")).await;

        assert!(profiles.is_empty());
        assert_eq!(search.calls().len(), 3);
    }
}
