use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

use crate::config::{EndpointSettings, ProviderSettings, RateLimitSettings};
use crate::core::fallback::{PeopleSearch, SearchParams};
use crate::core::filters::SearchQuery;
use crate::core::mapper::{map_profile, map_profiles};
use crate::models::{CandidateProfile, Pagination, Suggestion};
use crate::services::rate_limit::{RateLimiter, RateWindow};

/// Errors that can occur when talking to the people-data provider
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No response was received
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    pub fn is_transport(&self) -> bool {
        matches!(self, ProviderError::Transport(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Rate-limited client for the people-data API
///
/// One instance is built at startup and shared through the application state,
/// so the whole process draws from a single request window.
pub struct ProviderClient {
    base_url: String,
    api_key: String,
    api_host: String,
    client: Client,
    endpoints: EndpointSettings,
    limiter: RateLimiter,
}

impl ProviderClient {
    pub fn new(
        base_url: String,
        api_key: String,
        api_host: String,
        endpoints: EndpointSettings,
        limiter: RateLimiter,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            api_host,
            client,
            endpoints,
            limiter,
        })
    }

    /// Build a client when credentials are configured; `None` means mock mode
    pub fn from_settings(
        provider: &ProviderSettings,
        rate_limit: &RateLimitSettings,
    ) -> Result<Option<Self>, ProviderError> {
        let (api_key, api_host) = match provider.credentials() {
            Some(credentials) => credentials,
            None => return Ok(None),
        };
        let base_url = match provider.resolved_base_url() {
            Some(url) => url,
            None => return Ok(None),
        };

        let limiter = RateLimiter::new(
            rate_limit.max_requests_per_minute,
            Duration::from_secs(rate_limit.window_secs),
        );

        Self::new(
            base_url,
            api_key.to_string(),
            api_host.to_string(),
            provider.endpoints.clone(),
            limiter,
            Duration::from_secs(provider.timeout_secs),
        )
        .map(Some)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn rate_window(&self) -> RateWindow {
        self.limiter.snapshot().await
    }

    fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }

    /// GET with query parameters
    pub async fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Value, ProviderError> {
        let mut url = self.url(endpoint);
        if !params.is_empty() {
            let query = params
                .iter()
                .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                .collect::<Vec<_>>()
                .join("&");
            url = format!("{}?{}", url, query);
        }

        tracing::debug!("Making GET request to: {}", url);
        self.execute(self.client.get(&url), &url).await
    }

    /// POST with a JSON body
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<Value, ProviderError> {
        let url = self.url(endpoint);

        tracing::debug!("Making POST request to: {}", url);
        self.execute(self.client.post(&url).json(body), &url).await
    }

    async fn execute(&self, request: RequestBuilder, url: &str) -> Result<Value, ProviderError> {
        let slot = self.limiter.acquire().await;
        tracing::trace!("Request {} of {} in current window", slot, self.limiter.max_requests());

        let response = request
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", &self.api_host)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Request to {} failed: {}", url, e);
                ProviderError::Transport(e)
            })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| format!("API error: {}", status));

            tracing::warn!("API error from {}: {} - {}", url, status, message);
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| ProviderError::InvalidResponse(format!("Body is not JSON: {}", e)))
    }

    async fn get_with_alternate(
        &self,
        primary: &str,
        alternate: &str,
        params: &[(&str, &str)],
    ) -> Result<Value, ProviderError> {
        match self.get(primary, params).await {
            Ok(json) => Ok(json),
            Err(e) => {
                tracing::info!("Primary endpoint {} failed ({}), trying {}", primary, e, alternate);
                self.get(alternate, params).await
            }
        }
    }

    async fn post_with_alternate<B: Serialize + ?Sized>(
        &self,
        primary: &str,
        alternate: &str,
        body: &B,
    ) -> Result<Value, ProviderError> {
        match self.post(primary, body).await {
            Ok(json) => Ok(json),
            Err(e) => {
                tracing::info!("Primary endpoint {} failed ({}), trying {}", primary, e, alternate);
                self.post(alternate, body).await
            }
        }
    }

    /// Autocomplete values for a filter category
    pub async fn suggestions(&self, filter_key: &str, query: &str) -> Result<Vec<Suggestion>, ProviderError> {
        let json = self
            .get_with_alternate(
                &self.endpoints.suggestions,
                &self.endpoints.alt_suggestions,
                &[("filterKey", filter_key), ("query", query)],
            )
            .await?;

        let data = json.get("data").unwrap_or(&json);
        let items = data
            .get("suggestions")
            .and_then(Value::as_array)
            .ok_or_else(|| ProviderError::InvalidResponse("Missing suggestions array".into()))?;

        Ok(items.iter().filter_map(parse_suggestion).collect())
    }

    /// Filter search with a grouped include/exclude query
    pub async fn search_candidates(
        &self,
        query: &SearchQuery,
    ) -> Result<(Vec<CandidateProfile>, Pagination), ProviderError> {
        let json = self
            .post_with_alternate(&self.endpoints.search, &self.endpoints.alt_search, query)
            .await?;

        let data = json.get("data").unwrap_or(&json);
        let records = data
            .get("results")
            .or_else(|| data.get("profiles"))
            .and_then(Value::as_array)
            .ok_or_else(|| ProviderError::InvalidResponse("Missing results array".into()))?;

        let results = map_profiles(records);
        let pagination = parse_pagination(
            data.get("pagination"),
            query.pagination.page,
            query.pagination.page_size,
            results.len(),
        );

        tracing::debug!("Search returned {} results (total: {})", results.len(), pagination.total);

        Ok((results, pagination))
    }

    pub async fn profile(&self, profile_id: &str) -> Result<CandidateProfile, ProviderError> {
        let json = self
            .get_with_alternate(
                &self.endpoints.profile,
                &self.endpoints.alt_profile,
                &[("id", profile_id)],
            )
            .await?;

        let data = json.get("data").unwrap_or(&json);
        let record = data.get("profile").unwrap_or(data);
        if !record.is_object() {
            return Err(ProviderError::InvalidResponse("Profile is not an object".into()));
        }

        Ok(map_profile(record))
    }

    /// Resolve filter values to provider IDs, keyed by filter type
    pub async fn search_filters(
        &self,
        params: &SearchParams,
    ) -> Result<BTreeMap<String, String>, ProviderError> {
        let pairs: Vec<(&str, &str)> = params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        let json = self.get(&self.endpoints.search_filters, &pairs).await?;

        let ids = json
            .get("filters")
            .and_then(Value::as_object)
            .map(|filters| {
                filters
                    .iter()
                    .filter_map(|(kind, id)| match id {
                        Value::String(s) if !s.is_empty() => Some((kind.clone(), s.clone())),
                        Value::Number(n) => Some((kind.clone(), n.to_string())),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(ids)
    }
}

impl PeopleSearch for ProviderClient {
    type Error = ProviderError;

    async fn search_people(&self, params: &SearchParams) -> Result<Vec<Value>, ProviderError> {
        let pairs: Vec<(&str, &str)> = params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        let json = self.get(&self.endpoints.search_people, &pairs).await?;

        Ok(json
            .get("profiles")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default())
    }
}

fn parse_suggestion(item: &Value) -> Option<Suggestion> {
    let value = item.get("value").and_then(Value::as_str)?.to_string();
    let id = match item.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => value.clone(),
    };

    Some(Suggestion {
        id,
        value,
        count: item.get("count").and_then(Value::as_u64),
    })
}

fn parse_pagination(raw: Option<&Value>, page: u32, page_size: u32, returned: usize) -> Pagination {
    let field = |key: &str| raw.and_then(|p| p.get(key)).and_then(Value::as_u64);

    let total = field("total").unwrap_or(returned as u64);
    let page = field("page").map(|p| p as u32).unwrap_or(page);
    let page_size = field("pageSize").map(|p| p as u32).unwrap_or(page_size);
    let has_more = raw
        .and_then(|p| p.get("hasMore"))
        .and_then(Value::as_bool)
        .unwrap_or((page as u64) * (page_size as u64) < total);

    Pagination {
        total,
        page,
        page_size,
        has_more,
    }
}
