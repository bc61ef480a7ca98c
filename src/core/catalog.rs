use serde::Serialize;

/// A filterable candidate attribute as shown in the filter panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterCategory {
    pub key: &'static str,
    pub label: &'static str,
    pub required: bool,
}

pub const FILTER_CATEGORIES: &[FilterCategory] = &[
    FilterCategory { key: "jobTitle", label: "Job Title", required: true },
    FilterCategory { key: "company", label: "Company", required: true },
    FilterCategory { key: "location", label: "Location", required: true },
    FilterCategory { key: "experienceLevel", label: "Experience Level", required: true },
    FilterCategory { key: "industry", label: "Industry", required: true },
    FilterCategory { key: "profileLanguage", label: "Profile Language", required: true },
    FilterCategory { key: "currentCompany", label: "Current Company", required: false },
    FilterCategory { key: "pastCompany", label: "Past Company", required: false },
    FilterCategory { key: "school", label: "School", required: false },
    FilterCategory { key: "yearsOfExperience", label: "Years of Experience", required: false },
    FilterCategory { key: "function", label: "Function", required: false },
    FilterCategory { key: "seniorityLevel", label: "Seniority Level", required: false },
];

pub fn find_category(key: &str) -> Option<&'static FilterCategory> {
    FILTER_CATEGORIES.iter().find(|c| c.key == key)
}
