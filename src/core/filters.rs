use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{AttributeFilter, FilterType, SearchFilters};

/// Prefix that marks an exclusion key in the flat search shape
pub const EXCLUDED_PREFIX: &str = "excluded";

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// The user's active selection, unique by `(id, category)`
///
/// Every mutation produces a new list so callers always observe a complete
/// replacement of the previous selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    filters: Vec<AttributeFilter>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter unless its `(id, category)` pair is already selected
    pub fn add(&self, filter: AttributeFilter) -> Self {
        if self.contains(&filter.id, &filter.category) {
            return self.clone();
        }

        let mut filters = self.filters.clone();
        filters.push(filter);
        Self { filters }
    }

    /// Remove the filter with the given `(id, category)` pair
    pub fn remove(&self, id: &str, category: &str) -> Self {
        let filters = self
            .filters
            .iter()
            .filter(|f| !(f.id == id && f.category == category))
            .cloned()
            .collect();
        Self { filters }
    }

    pub fn clear(&self) -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str, category: &str) -> bool {
        self.filters
            .iter()
            .any(|f| f.id == id && f.category == category)
    }

    pub fn by_category(&self, category: &str) -> Vec<&AttributeFilter> {
        self.filters.iter().filter(|f| f.category == category).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn as_slice(&self) -> &[AttributeFilter] {
        &self.filters
    }

    /// Translate the selection into the flat search shape
    pub fn to_search_filters(&self, page: u32, page_size: u32) -> SearchFilters {
        build_search_filters(&self.filters, page, page_size)
    }

    /// Group the selection straight into the upstream query shape
    pub fn to_query(&self, page: u32, page_size: u32) -> SearchQuery {
        build_search_query(&self.filters, page, page_size)
    }
}

impl FromIterator<AttributeFilter> for FilterSet {
    /// Build a set from raw input; later duplicates of a pair are dropped
    fn from_iter<I: IntoIterator<Item = AttributeFilter>>(iter: I) -> Self {
        iter.into_iter()
            .fold(FilterSet::new(), |set, filter| set.add(filter))
    }
}

/// `location` -> `excludedLocation`
pub fn excluded_key(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => format!(
            "{}{}{}",
            EXCLUDED_PREFIX,
            first.to_uppercase(),
            chars.as_str()
        ),
        None => EXCLUDED_PREFIX.to_string(),
    }
}

/// `excludedLocation` -> `Some("location")`, anything else -> `None`
pub fn category_of_excluded(key: &str) -> Option<String> {
    let rest = key.strip_prefix(EXCLUDED_PREFIX)?;
    let mut chars = rest.chars();
    let first = chars.next()?;
    Some(format!("{}{}", first.to_lowercase(), chars.as_str()))
}

/// Group an ordered filter list into category and `excluded<Category>` value lists
///
/// Values keep their insertion order and duplicates are passed through untouched.
/// Category names are not validated.
pub fn build_search_filters(
    filters: &[AttributeFilter],
    page: u32,
    page_size: u32,
) -> SearchFilters {
    let mut values: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for filter in filters {
        let key = match filter.filter_type {
            FilterType::Include => filter.category.clone(),
            FilterType::Exclude => excluded_key(&filter.category),
        };
        values.entry(key).or_default().push(filter.value.clone());
    }

    SearchFilters {
        page: Some(page),
        page_size: Some(page_size),
        values,
    }
}

/// Group an ordered filter list by category without going through the flat shape
///
/// Category names are kept verbatim, so any category (capitalized, empty or
/// starting with `excluded`) round-trips through [`SearchQuery::partition`].
pub fn build_search_query(filters: &[AttributeFilter], page: u32, page_size: u32) -> SearchQuery {
    let mut grouped: BTreeMap<String, CategoryQuery> = BTreeMap::new();

    for filter in filters {
        let entry = grouped.entry(filter.category.clone()).or_default();
        match filter.filter_type {
            FilterType::Include => entry.include.push(filter.value.clone()),
            FilterType::Exclude => entry.exclude.push(filter.value.clone()),
        }
    }

    SearchQuery {
        filters: grouped,
        pagination: QueryPagination {
            page: page.max(1),
            page_size: page_size.max(1),
        },
    }
}

/// Include/exclude lists of one category in the upstream request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryQuery {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPagination {
    pub page: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
}

/// Request body posted to the upstream search endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub filters: BTreeMap<String, CategoryQuery>,
    pub pagination: QueryPagination,
}

impl SearchQuery {
    /// Re-derive `(category, type, value)` triples from the grouped query
    pub fn partition(&self) -> Vec<(String, FilterType, String)> {
        let mut triples = Vec::new();
        for (category, query) in &self.filters {
            for value in &query.include {
                triples.push((category.clone(), FilterType::Include, value.clone()));
            }
            for value in &query.exclude {
                triples.push((category.clone(), FilterType::Exclude, value.clone()));
            }
        }
        triples
    }

    /// True when at least one category carries a value
    pub fn has_criteria(&self) -> bool {
        self.filters
            .values()
            .any(|q| !q.include.is_empty() || !q.exclude.is_empty())
    }

    /// First included value of a category, used to seed mock data
    pub fn first(&self, category: &str) -> Option<&str> {
        self.filters
            .get(category)
            .and_then(|q| q.include.first())
            .map(String::as_str)
    }
}

impl SearchFilters {
    pub fn page_or_default(&self) -> u32 {
        self.page.unwrap_or(DEFAULT_PAGE).max(1)
    }

    pub fn page_size_or_default(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1)
    }

    /// Same filters, different page
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: Some(page),
            ..self.clone()
        }
    }

    /// True when at least one category carries a value
    pub fn has_criteria(&self) -> bool {
        self.values.values().any(|v| !v.is_empty())
    }

    /// First included value of a category, used to seed mock data
    pub fn first(&self, category: &str) -> Option<&str> {
        self.values
            .get(category)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    /// Group flat keys into per-category include/exclude lists
    pub fn to_query(&self) -> SearchQuery {
        let mut filters: BTreeMap<String, CategoryQuery> = BTreeMap::new();

        for (key, values) in &self.values {
            if values.is_empty() {
                continue;
            }

            match category_of_excluded(key) {
                Some(category) => filters
                    .entry(category)
                    .or_default()
                    .exclude
                    .extend(values.iter().cloned()),
                None => filters
                    .entry(key.clone())
                    .or_default()
                    .include
                    .extend(values.iter().cloned()),
            }
        }

        SearchQuery {
            filters,
            pagination: QueryPagination {
                page: self.page_or_default(),
                page_size: self.page_size_or_default(),
            },
        }
    }
}
