// Unit tests for Talent Scout

use serde_json::json;
use talent_scout::core::filters::{build_search_query, category_of_excluded, excluded_key};
use talent_scout::core::{build_search_filters, create_filter_fallbacks, map_profile, prioritize_filters, FilterSet};
use talent_scout::models::{AttributeFilter, FilterKind, FilterType, GeneratedFilter, SearchFilters};

const CATEGORIES: [&str; 8] = [
    "jobTitle",
    "company",
    "location",
    "school",
    "seniorityLevel",
    "Company",
    "excludedSkills",
    "",
];

/// Pseudo-random but reproducible selection
fn selection(seed: usize, len: usize) -> Vec<AttributeFilter> {
    (0..len)
        .map(|i| {
            let n = (seed * 31 + i * 17) % 97;
            let category = CATEGORIES[n % CATEGORIES.len()];
            let id = format!("id-{}", n % 7);
            let value = format!("value-{}", n % 5);
            if n % 2 == 0 {
                AttributeFilter::include(&id, &value, category)
            } else {
                AttributeFilter::exclude(&id, &value, category)
            }
        })
        .collect()
}

#[test]
fn test_translation_preserves_every_filter() {
    for seed in 0..50 {
        let filters = selection(seed, seed % 12);
        let query = build_search_query(&filters, 1, 10);

        let mut expected: Vec<(String, FilterType, String)> = filters
            .iter()
            .map(|f| (f.category.clone(), f.filter_type, f.value.clone()))
            .collect();
        let mut actual = query.partition();
        expected.sort_by(|a, b| format!("{:?}", a).cmp(&format!("{:?}", b)));
        actual.sort_by(|a, b| format!("{:?}", a).cmp(&format!("{:?}", b)));

        assert_eq!(actual, expected, "seed {}", seed);
    }
}

#[test]
fn test_translation_keeps_value_order_within_key() {
    let filters = vec![
        AttributeFilter::include("1", "Berlin", "location"),
        AttributeFilter::exclude("2", "Paris", "location"),
        AttributeFilter::include("3", "Lisbon", "location"),
        AttributeFilter::include("1", "Berlin", "location"),
    ];

    let search = build_search_filters(&filters, 3, 25);

    assert_eq!(search.values["location"], vec!["Berlin", "Lisbon", "Berlin"]);
    assert_eq!(search.values["excludedLocation"], vec!["Paris"]);
    assert_eq!(search.page, Some(3));
    assert_eq!(search.page_size, Some(25));
}

#[test]
fn test_search_filters_wire_shape() {
    let search = build_search_filters(
        &[
            AttributeFilter::include("jt-1", "Software Engineer", "jobTitle"),
            AttributeFilter::exclude("co-3", "Amazon", "company"),
        ],
        2,
        10,
    );

    let wire = serde_json::to_value(&search).unwrap();
    assert_eq!(
        wire,
        json!({
            "page": 2,
            "pageSize": 10,
            "jobTitle": ["Software Engineer"],
            "excludedCompany": ["Amazon"]
        })
    );

    let parsed: SearchFilters = serde_json::from_value(wire).unwrap();
    assert_eq!(parsed, search);
}

#[test]
fn test_excluded_key_naming() {
    assert_eq!(excluded_key("seniorityLevel"), "excludedSeniorityLevel");
    assert_eq!(category_of_excluded("excludedSeniorityLevel").as_deref(), Some("seniorityLevel"));
    assert_eq!(category_of_excluded("seniorityLevel"), None);
}

#[test]
fn test_filter_set_membership() {
    let set = FilterSet::new()
        .add(AttributeFilter::include("co-1", "Google", "company"))
        .add(AttributeFilter::exclude("co-1", "Google", "company"))
        .add(AttributeFilter::include("co-1", "Google", "pastCompany"));

    assert_eq!(set.len(), 2);
    assert_eq!(set.as_slice()[0].filter_type, FilterType::Include);

    let removed = set.remove("co-1", "company");
    assert_eq!(removed.len(), 1);
    assert!(!removed.contains("co-1", "company"));
    // the original selection is untouched
    assert!(set.contains("co-1", "company"));

    assert!(set.clear().is_empty());
}

#[test]
fn test_profile_mapping_defaults() {
    let profile = map_profile(&json!({
        "name": "",
        "skills": " Rust ,, Go ",
        "connectionDegree": "0",
        "sharedConnections": 12
    }));

    assert!(profile.id.starts_with("profile_"));
    assert_eq!(profile.id.len(), "profile_".len() + 9);
    assert_eq!(profile.name, "Unknown");
    assert_eq!(profile.skills, vec!["Rust", "Go"]);
    assert_eq!(profile.connection_degree, 3);
    assert_eq!(profile.shared_connections, 12);
    assert!(profile.experience.is_empty());
}

#[test]
fn test_prioritize_then_fallbacks() {
    let filters = vec![
        GeneratedFilter::new(FilterKind::Skills, "Rust", 7),
        GeneratedFilter::new(FilterKind::Location, "Mumbai", 9),
        GeneratedFilter::new(FilterKind::Title, "SRE", 9),
    ];

    let ordered = prioritize_filters(&filters);
    assert_eq!(ordered[0].kind, FilterKind::Location);
    assert_eq!(ordered[1].kind, FilterKind::Title);
    assert_eq!(ordered[2].kind, FilterKind::Skills);

    let fallbacks = create_filter_fallbacks(&ordered);
    let mumbai = &fallbacks["Mumbai"];
    assert_eq!(mumbai[0], "Bombay");
    assert!(mumbai.ends_with(&["Remote Mumbai".to_string(), "Mumbai Remote".to_string()]));
    assert!(!fallbacks.contains_key("SRE"));
}
