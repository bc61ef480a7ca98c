use serde_json::Value;

use crate::models::{CandidateProfile, Education, Experience};

/// Degree reported when the upstream record carries none
pub const DEFAULT_CONNECTION_DEGREE: u32 = 3;

/// Normalize one upstream record into a [`CandidateProfile`]
///
/// The provider's response shape is not contractually fixed, so every field is
/// read on its own and falls back to a default when absent or mistyped.
pub fn map_profile(record: &Value) -> CandidateProfile {
    let id = record_id(record).unwrap_or_else(synthetic_id);
    let name = non_empty_str(record, "name").unwrap_or_else(|| "Unknown".to_string());

    CandidateProfile {
        id,
        name,
        headline: string_or_empty(record, "headline"),
        location: string_or_empty(record, "location"),
        profile_url: string_or_empty(record, "profileUrl"),
        profile_image_url: non_empty_str(record, "profileImageUrl"),
        current_company: non_empty_str(record, "currentCompany")
            .or_else(|| non_empty_str(record, "company")),
        current_role: non_empty_str(record, "currentRole"),
        experience: list_of(record, "experience", map_experience),
        education: list_of(record, "education", map_education),
        skills: map_skills(record.get("skills")),
        connection_degree: positive_number(record.get("connectionDegree"))
            .unwrap_or(DEFAULT_CONNECTION_DEGREE),
        shared_connections: positive_number(record.get("sharedConnections")).unwrap_or(0),
    }
}

pub fn map_profiles(records: &[Value]) -> Vec<CandidateProfile> {
    records.iter().map(map_profile).collect()
}

/// Accept a list of values or a single comma-delimited string
pub fn map_skills(skills: Option<&Value>) -> Vec<String> {
    match skills {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        Some(Value::String(joined)) => joined
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// String or numeric upstream id
fn record_id(record: &Value) -> Option<String> {
    match record.get("id")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn synthetic_id() -> String {
    let raw = uuid::Uuid::new_v4().simple().to_string();
    format!("profile_{}", &raw[..9])
}

fn non_empty_str(record: &Value, key: &str) -> Option<String> {
    record
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn string_or_empty(record: &Value, key: &str) -> String {
    non_empty_str(record, key).unwrap_or_default()
}

fn positive_number(value: Option<&Value>) -> Option<u32> {
    let number = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    if number.is_finite() && number >= 1.0 && number <= u32::MAX as f64 {
        Some(number as u32)
    } else {
        None
    }
}

fn list_of<T>(record: &Value, key: &str, map: fn(&Value) -> T) -> Vec<T> {
    record
        .get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter(|i| i.is_object()).map(map).collect())
        .unwrap_or_default()
}

fn map_experience(item: &Value) -> Experience {
    Experience {
        title: string_or_empty(item, "title"),
        company: string_or_empty(item, "company"),
        duration: string_or_empty(item, "duration"),
    }
}

fn map_education(item: &Value) -> Education {
    Education {
        school: string_or_empty(item, "school"),
        degree: non_empty_str(item, "degree"),
        field_of_study: non_empty_str(item, "fieldOfStudy"),
        years: non_empty_str(item, "years"),
    }
}
