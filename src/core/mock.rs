//! Deterministic stand-in data used when the data provider is unavailable.

use crate::core::filters::{SearchQuery, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use crate::models::{CandidateProfile, Education, Experience, Pagination, Suggestion};

/// Maximum number of suggestions returned per lookup
pub const SUGGESTION_LIMIT: usize = 5;

/// Total reported by mock pagination
pub const MOCK_TOTAL: u64 = 120;

type Entry = (&'static str, &'static str, u64);

const JOB_TITLES: &[Entry] = &[
    ("jt-1", "Software Engineer", 15400),
    ("jt-2", "Senior Software Engineer", 9800),
    ("jt-3", "Product Manager", 7200),
    ("jt-4", "Data Scientist", 5100),
    ("jt-5", "Data Engineer", 4300),
    ("jt-6", "Engineering Manager", 3900),
    ("jt-7", "Frontend Developer", 6100),
    ("jt-8", "Backend Developer", 5800),
    ("jt-9", "DevOps Engineer", 3300),
    ("jt-10", "UX Designer", 2700),
];

const COMPANIES: &[Entry] = &[
    ("co-1", "Google", 21000),
    ("co-2", "Microsoft", 19500),
    ("co-3", "Amazon", 24000),
    ("co-4", "Meta", 11000),
    ("co-5", "Apple", 12500),
    ("co-6", "Infosys", 30100),
    ("co-7", "Tata Consultancy Services", 35200),
    ("co-8", "Flipkart", 6400),
    ("co-9", "Stripe", 2100),
    ("co-10", "Netflix", 1800),
];

const LOCATIONS: &[Entry] = &[
    ("lo-1", "San Francisco, CA", 18000),
    ("lo-2", "New York, NY", 22000),
    ("lo-3", "Bangalore, India", 26000),
    ("lo-4", "Mumbai, India", 14000),
    ("lo-5", "Chennai, India", 9000),
    ("lo-6", "London, United Kingdom", 16000),
    ("lo-7", "Berlin, Germany", 7000),
    ("lo-8", "Seattle, WA", 11000),
    ("lo-9", "Toronto, Canada", 8000),
    ("lo-10", "Singapore", 6500),
];

const EXPERIENCE_LEVELS: &[Entry] = &[
    ("el-1", "Internship", 4000),
    ("el-2", "Entry level", 12000),
    ("el-3", "Associate", 9000),
    ("el-4", "Mid-Senior level", 15000),
    ("el-5", "Director", 3000),
    ("el-6", "Executive", 1200),
];

const INDUSTRIES: &[Entry] = &[
    ("in-1", "Information Technology", 40000),
    ("in-2", "Financial Services", 18000),
    ("in-3", "Healthcare", 12000),
    ("in-4", "Computer Software", 33000),
    ("in-5", "Internet", 21000),
    ("in-6", "Telecommunications", 8000),
    ("in-7", "Retail", 9500),
];

const PROFILE_LANGUAGES: &[Entry] = &[
    ("pl-1", "English", 90000),
    ("pl-2", "Spanish", 12000),
    ("pl-3", "French", 9000),
    ("pl-4", "German", 8500),
    ("pl-5", "Hindi", 7000),
    ("pl-6", "Portuguese", 6000),
];

const SCHOOLS: &[Entry] = &[
    ("sc-1", "Stanford University", 5200),
    ("sc-2", "Massachusetts Institute of Technology", 4800),
    ("sc-3", "Indian Institute of Technology Bombay", 3900),
    ("sc-4", "University of California, Berkeley", 4400),
    ("sc-5", "Carnegie Mellon University", 3100),
    ("sc-6", "University of Oxford", 2900),
];

const YEARS_OF_EXPERIENCE: &[Entry] = &[
    ("ye-1", "Less than 1 year", 8000),
    ("ye-2", "1 to 2 years", 11000),
    ("ye-3", "3 to 5 years", 16000),
    ("ye-4", "6 to 10 years", 14000),
    ("ye-5", "More than 10 years", 10000),
];

const FUNCTIONS: &[Entry] = &[
    ("fn-1", "Engineering", 42000),
    ("fn-2", "Information Technology", 30000),
    ("fn-3", "Product Management", 9000),
    ("fn-4", "Research", 6000),
    ("fn-5", "Sales", 25000),
    ("fn-6", "Marketing", 15000),
];

const SENIORITY_LEVELS: &[Entry] = &[
    ("sl-1", "Entry", 14000),
    ("sl-2", "Senior", 17000),
    ("sl-3", "Manager", 9000),
    ("sl-4", "Director", 3500),
    ("sl-5", "VP", 1500),
    ("sl-6", "CXO", 700),
];

/// Canned suggestion table for a filter key
pub fn suggestion_table(filter_key: &str) -> &'static [Entry] {
    match filter_key {
        "jobTitle" => JOB_TITLES,
        "company" | "currentCompany" | "pastCompany" => COMPANIES,
        "location" => LOCATIONS,
        "experienceLevel" => EXPERIENCE_LEVELS,
        "industry" => INDUSTRIES,
        "profileLanguage" => PROFILE_LANGUAGES,
        "school" => SCHOOLS,
        "yearsOfExperience" => YEARS_OF_EXPERIENCE,
        "function" => FUNCTIONS,
        "seniorityLevel" => SENIORITY_LEVELS,
        _ => &[],
    }
}

/// Case-insensitive substring lookup, capped at [`SUGGESTION_LIMIT`]
pub fn suggest(filter_key: &str, query: &str) -> Vec<Suggestion> {
    let needle = query.to_lowercase();

    suggestion_table(filter_key)
        .iter()
        .filter(|(_, value, _)| value.to_lowercase().contains(&needle))
        .take(SUGGESTION_LIMIT)
        .map(|(id, value, count)| Suggestion {
            id: id.to_string(),
            value: value.to_string(),
            count: Some(*count),
        })
        .collect()
}

/// One page of synthetic candidates seeded from the requested filters
pub fn generate_mock_results(filters: &SearchQuery) -> Vec<CandidateProfile> {
    let page = filters.pagination.page.max(1);
    let page_size = filters.pagination.page_size.max(1);
    let start = (page as u64 - 1) * page_size as u64;

    let title = filters.first("jobTitle").unwrap_or("Software Engineer");
    let location = filters.first("location").unwrap_or("San Francisco, CA");
    let company = filters.first("company").unwrap_or("Tech Company");
    let past_company = filters.first("pastCompany").unwrap_or("Previous Company");
    let school = filters.first("school").unwrap_or("University");

    (0..page_size as u64)
        .map(|offset| {
            let index = start + offset;
            CandidateProfile {
                id: format!("profile-{}", index),
                name: format!("Candidate {}", index + 1),
                headline: title.to_string(),
                location: location.to_string(),
                profile_url: format!("https://linkedin.com/in/candidate-{}", index + 1),
                profile_image_url: None,
                current_company: Some(company.to_string()),
                current_role: Some(title.to_string()),
                experience: vec![
                    Experience {
                        title: title.to_string(),
                        company: company.to_string(),
                        duration: "2020 - Present".to_string(),
                    },
                    Experience {
                        title: "Previous Role".to_string(),
                        company: past_company.to_string(),
                        duration: "2018 - 2020".to_string(),
                    },
                ],
                education: vec![Education {
                    school: school.to_string(),
                    degree: Some("Bachelor's Degree".to_string()),
                    field_of_study: Some("Computer Science".to_string()),
                    years: Some("2014 - 2018".to_string()),
                }],
                skills: default_skills(),
                connection_degree: 2,
                shared_connections: 5,
            }
        })
        .collect()
}

/// Fixed profile returned for single-profile lookups
pub fn generate_mock_profile(profile_id: &str) -> CandidateProfile {
    CandidateProfile {
        id: profile_id.to_string(),
        name: "John Doe".to_string(),
        headline: "Senior Software Engineer".to_string(),
        location: "San Francisco, CA".to_string(),
        profile_url: "https://linkedin.com/in/johndoe".to_string(),
        profile_image_url: None,
        current_company: Some("Tech Company".to_string()),
        current_role: Some("Senior Software Engineer".to_string()),
        experience: vec![
            Experience {
                title: "Senior Software Engineer".to_string(),
                company: "Tech Company".to_string(),
                duration: "2020 - Present".to_string(),
            },
            Experience {
                title: "Software Engineer".to_string(),
                company: "Previous Company".to_string(),
                duration: "2018 - 2020".to_string(),
            },
        ],
        education: vec![Education {
            school: "University of California".to_string(),
            degree: Some("Bachelor of Science".to_string()),
            field_of_study: Some("Computer Science".to_string()),
            years: Some("2014 - 2018".to_string()),
        }],
        skills: default_skills(),
        connection_degree: 2,
        shared_connections: 5,
    }
}

pub fn mock_pagination(page: Option<u32>, page_size: Option<u32>) -> Pagination {
    let page = page.unwrap_or(DEFAULT_PAGE).max(1);
    let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1);

    Pagination {
        total: MOCK_TOTAL,
        page,
        page_size,
        has_more: (page as u64) * (page_size as u64) < MOCK_TOTAL,
    }
}

fn default_skills() -> Vec<String> {
    ["JavaScript", "React", "Node.js", "TypeScript", "GraphQL"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::FILTER_CATEGORIES;
    use crate::models::SearchFilters;
    use std::collections::BTreeMap;

    #[test]
    fn test_every_category_has_suggestions() {
        for category in FILTER_CATEGORIES {
            assert!(
                !suggestion_table(category.key).is_empty(),
                "no mock suggestions for {}",
                category.key
            );
        }
    }

    #[test]
    fn test_suggest_is_case_insensitive_and_capped() {
        let hits = suggest("jobTitle", "ENGINEER");
        assert!(hits.iter().all(|s| s.value.to_lowercase().contains("engineer")));
        assert!(hits.len() <= SUGGESTION_LIMIT);

        assert_eq!(suggest("jobTitle", "").len(), SUGGESTION_LIMIT);
        assert!(suggest("unknownKey", "a").is_empty());
    }

    #[test]
    fn test_mock_results_are_seeded_and_paged() {
        let mut values = BTreeMap::new();
        values.insert("jobTitle".to_string(), vec!["Rust Developer".to_string()]);
        values.insert("location".to_string(), vec!["Berlin".to_string()]);
        let filters = SearchFilters {
            page: Some(2),
            page_size: Some(5),
            values,
        }
        .to_query();

        let results = generate_mock_results(&filters);

        assert_eq!(results.len(), 5);
        assert_eq!(results[0].id, "profile-5");
        assert_eq!(results[0].name, "Candidate 6");
        assert_eq!(results[0].headline, "Rust Developer");
        assert_eq!(results[4].location, "Berlin");
        assert_eq!(generate_mock_results(&filters), results);
    }

    #[test]
    fn test_mock_pagination() {
        let first = mock_pagination(None, None);
        assert_eq!(first.page, 1);
        assert_eq!(first.page_size, 10);
        assert!(first.has_more);

        let last = mock_pagination(Some(12), Some(10));
        assert!(!last.has_more);
    }
}
