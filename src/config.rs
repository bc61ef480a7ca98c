use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub provider: ProviderSettings,
    #[serde(default)]
    pub rate_limit: RateLimitSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub generator: GeneratorSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

/// Third-party people-data API
///
/// A missing key or host switches every endpoint to mock data.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSettings {
    pub api_key: Option<String>,
    pub api_host: Option<String>,
    /// Overrides `https://{api_host}`
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub endpoints: EndpointSettings,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_host: None,
            base_url: None,
            timeout_secs: default_timeout_secs(),
            endpoints: EndpointSettings::default(),
        }
    }
}

impl ProviderSettings {
    /// Key and host, when both are present and non-empty
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let key = self.api_key.as_deref().filter(|k| !k.trim().is_empty())?;
        let host = self.api_host.as_deref().filter(|h| !h.trim().is_empty())?;
        Some((key, host))
    }

    pub fn resolved_base_url(&self) -> Option<String> {
        match &self.base_url {
            Some(url) if !url.is_empty() => Some(url.trim_end_matches('/').to_string()),
            _ => self
                .api_host
                .as_deref()
                .map(|host| format!("https://{}", host)),
        }
    }
}

/// Upstream paths; each lookup has a primary and an alternate route
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointSettings {
    #[serde(default = "default_suggestions")]
    pub suggestions: String,
    #[serde(default = "default_alt_suggestions")]
    pub alt_suggestions: String,
    #[serde(default = "default_search")]
    pub search: String,
    #[serde(default = "default_alt_search")]
    pub alt_search: String,
    #[serde(default = "default_profile")]
    pub profile: String,
    #[serde(default = "default_alt_profile")]
    pub alt_profile: String,
    #[serde(default = "default_search_filters")]
    pub search_filters: String,
    #[serde(default = "default_search_people")]
    pub search_people: String,
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            suggestions: default_suggestions(),
            alt_suggestions: default_alt_suggestions(),
            search: default_search(),
            alt_search: default_alt_search(),
            profile: default_profile(),
            alt_profile: default_alt_profile(),
            search_filters: default_search_filters(),
            search_people: default_search_people(),
        }
    }
}

fn default_suggestions() -> String { "/api/v1/suggestions".to_string() }
fn default_alt_suggestions() -> String { "/suggestions".to_string() }
fn default_search() -> String { "/api/v1/search".to_string() }
fn default_alt_search() -> String { "/search".to_string() }
fn default_profile() -> String { "/api/v1/profile".to_string() }
fn default_alt_profile() -> String { "/profile".to_string() }
fn default_search_filters() -> String { "/searchFilters".to_string() }
fn default_search_people() -> String { "/searchPeople".to_string() }
fn default_timeout_secs() -> u64 { 30 }

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitSettings {
    #[serde(default = "default_max_requests")]
    pub max_requests_per_minute: u32,
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            max_requests_per_minute: default_max_requests(),
            window_secs: default_window_secs(),
        }
    }
}

fn default_max_requests() -> u32 { 10 }
fn default_window_secs() -> u64 { 60 }

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_min_results")]
    pub min_results: usize,
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            min_results: default_min_results(),
            default_page_size: default_page_size(),
        }
    }
}

fn default_min_results() -> usize { 10 }
fn default_page_size() -> u32 { 10 }

/// OpenAI-compatible chat-completions service
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorSettings {
    pub api_key: Option<String>,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_generator_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: default_api_base(),
            model: default_model(),
            temperature: default_temperature(),
            timeout_secs: default_generator_timeout_secs(),
        }
    }
}

impl GeneratorSettings {
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }
}

fn default_api_base() -> String { "https://api.openai.com/v1".to_string() }
fn default_model() -> String { "gpt-4o".to_string() }
fn default_temperature() -> f32 { 0.2 }
fn default_generator_timeout_secs() -> u64 { 60 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with TALENT__)
    /// 5. Well-known credentials: RAPIDAPI_KEY, RAPIDAPI_HOST, OPENAI_API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., TALENT__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("TALENT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_credential_env(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("TALENT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Let the conventional credential variables override file settings
fn apply_credential_env(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let overrides = [
        ("provider.api_key", env::var("RAPIDAPI_KEY").ok()),
        ("provider.api_host", env::var("RAPIDAPI_HOST").ok()),
        ("generator.api_key", env::var("OPENAI_API_KEY").ok()),
    ];

    let mut builder = Config::builder().add_source(settings);

    for (key, value) in overrides {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            builder = builder.set_override(key, value)?;
        }
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.rate_limit.max_requests_per_minute, 10);
        assert_eq!(settings.rate_limit.window_secs, 60);
        assert_eq!(settings.search.min_results, 10);
        assert_eq!(settings.provider.endpoints.search, "/api/v1/search");
        assert_eq!(settings.generator.model, "gpt-4o");
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_credentials_require_key_and_host() {
        let mut provider = ProviderSettings::default();
        assert!(provider.credentials().is_none());

        provider.api_key = Some("key".to_string());
        assert!(provider.credentials().is_none());

        provider.api_host = Some("people.example.com".to_string());
        assert_eq!(provider.credentials(), Some(("key", "people.example.com")));
        assert_eq!(
            provider.resolved_base_url().as_deref(),
            Some("https://people.example.com")
        );

        provider.base_url = Some("http://127.0.0.1:9000/".to_string());
        assert_eq!(provider.resolved_base_url().as_deref(), Some("http://127.0.0.1:9000"));
    }

    #[test]
    fn test_blank_generator_key_is_missing() {
        let generator = GeneratorSettings {
            api_key: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(generator.api_key().is_none());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("talent-scout-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            "[rate_limit]\nmax_requests_per_minute = 3\n\n[search]\nmin_results = 5\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.rate_limit.max_requests_per_minute, 3);
        assert_eq!(settings.search.min_results, 5);
        assert_eq!(settings.server.port, 8080);
    }
}
