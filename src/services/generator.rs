use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::config::GeneratorSettings;
use crate::models::{CandidateProfile, GeneratedFilter, JobDescription, MatchAnalysis};

/// Errors from the generative-text service
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Generator API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid generator response: {0}")]
    InvalidResponse(String),
}

const FILTER_SYSTEM_PROMPT: &str = "You are an expert at optimizing LinkedIn search filters to find the best candidates. \
Based on the job description, create LinkedIn search filters that will yield relevant results. \
For each filter, assign a priority from 1-10 (10 being highest) to indicate its importance. \
Respond with a JSON object of the form {\"filters\": [{\"type\": string, \"value\": string, \"priority\": number}]} \
where type is one of keywords, location, company, industry, title, experience, skills.";

const JOB_SYSTEM_PROMPT: &str = "You write job descriptions. Respond with a JSON object with the fields \
title (string), location (string), experienceLevel (string), skills (array of strings) and description (string).";

const MATCH_SYSTEM_PROMPT: &str = "You are an expert at evaluating how well a candidate matches a job description. \
Analyze the candidate's profile against the job requirements. Respond with a JSON object \
{\"score\": number from 0 to 100, \"reasons\": [string]}.";

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FilterPayload {
    Wrapped { filters: Vec<RawFilter> },
    Bare(Vec<RawFilter>),
}

#[derive(Debug, Deserialize)]
struct RawFilter {
    #[serde(rename = "type")]
    kind: crate::models::FilterKind,
    value: String,
    #[serde(default = "default_priority")]
    priority: f64,
}

fn default_priority() -> f64 {
    5.0
}

#[derive(Debug, Deserialize)]
struct RawMatch {
    score: f64,
    #[serde(default)]
    reasons: Vec<String>,
}

/// Client for an OpenAI-compatible chat-completions endpoint returning JSON objects
pub struct JobGenerator {
    client: Client,
    api_base: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl JobGenerator {
    pub fn new(settings: &GeneratorSettings, api_key: &str) -> Result<Self, GeneratorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: settings.model.clone(),
            temperature: settings.temperature,
        })
    }

    /// `None` when no API key is configured
    pub fn from_settings(settings: &GeneratorSettings) -> Result<Option<Self>, GeneratorError> {
        match settings.api_key() {
            Some(key) => Self::new(settings, key).map(Some),
            None => Ok(None),
        }
    }

    /// Expand a free-form prompt into a structured job description
    pub async fn generate_job_description(&self, prompt: &str) -> Result<JobDescription, GeneratorError> {
        let user = format!(
            "Generate a detailed job description based on the following prompt: \"{}\". \
             Include a job title, location, experience level, at least 5 required skills, and a detailed description.",
            prompt
        );

        self.complete(JOB_SYSTEM_PROMPT, &user).await
    }

    /// Derive prioritized search filters from a job description
    pub async fn generate_filters(&self, job: &JobDescription) -> Result<Vec<GeneratedFilter>, GeneratorError> {
        let user = format!(
            "Generate LinkedIn search filters based on this job description:\n\n\
             Title: {}\nLocation: {}\nExperience Level: {}\nSkills: {}\nDescription: {}\n\n\
             Create filters for keywords, location, title, experience level, and skills.",
            job.title,
            job.location,
            job.experience_level,
            job.skills.join(", "),
            job.description
        );

        let payload: FilterPayload = self.complete(FILTER_SYSTEM_PROMPT, &user).await?;
        let raw = match payload {
            FilterPayload::Wrapped { filters } => filters,
            FilterPayload::Bare(filters) => filters,
        };

        Ok(raw
            .into_iter()
            .filter(|f| !f.value.trim().is_empty())
            .map(|f| GeneratedFilter::new(f.kind, f.value.trim(), clamp_priority(f.priority)))
            .collect())
    }

    /// Score a candidate against a job from 0 to 100
    pub async fn analyze_profile_match(
        &self,
        profile: &CandidateProfile,
        job: &JobDescription,
    ) -> Result<MatchAnalysis, GeneratorError> {
        let user = format!(
            "Analyze how well this candidate matches the job requirements:\n\n\
             Job Description:\nTitle: {}\nLocation: {}\nExperience Level: {}\nSkills: {}\nDescription: {}\n\n\
             Candidate Profile:\nName: {}\nHeadline: {}\nCompany: {}\nLocation: {}\nSkills: {}",
            job.title,
            job.location,
            job.experience_level,
            job.skills.join(", "),
            job.description,
            profile.name,
            profile.headline,
            profile.current_company.as_deref().unwrap_or(""),
            profile.location,
            profile.skills.join(", ")
        );

        let raw: RawMatch = self.complete(MATCH_SYSTEM_PROMPT, &user).await?;

        Ok(MatchAnalysis {
            score: raw.score.clamp(0.0, 100.0).round() as u8,
            reasons: raw.reasons,
        })
    }

    async fn complete<T: DeserializeOwned>(&self, system: &str, user: &str) -> Result<T, GeneratorError> {
        let url = format!("{}/chat/completions", self.api_base);
        let body = serde_json::json!({
            "model": self.model,
            "temperature": self.temperature,
            "response_format": { "type": "json_object" },
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
        });

        tracing::info!("Sending completion request to {} (model: {})", url, self.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| {
                    v.pointer("/error/message")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .unwrap_or_else(|| format!("status {}", status));
            tracing::error!("Generator API error {}: {}", status, message);
            return Err(GeneratorError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let json: Value = serde_json::from_str(&text)
            .map_err(|e| GeneratorError::InvalidResponse(format!("Body is not JSON: {}", e)))?;
        let content = parse_completion_content(&json)?;

        serde_json::from_value(content)
            .map_err(|e| GeneratorError::InvalidResponse(format!("Unexpected content shape: {}", e)))
    }
}

/// Pull the JSON document out of `choices[0].message.content`
fn parse_completion_content(json: &Value) -> Result<Value, GeneratorError> {
    let content = json
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .ok_or_else(|| GeneratorError::InvalidResponse("Missing message content".into()))?;

    serde_json::from_str(strip_code_fence(content))
        .map_err(|_| GeneratorError::InvalidResponse("Message content is not valid JSON".into()))
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}

fn clamp_priority(priority: f64) -> u8 {
    if priority.is_finite() {
        priority.round().clamp(1.0, 10.0) as u8
    } else {
        1
    }
}
