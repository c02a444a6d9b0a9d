//! Environment-driven configuration for the weather service.
//!
//! The API credential is deliberately optional at load time: a missing key
//! is reported as a validation warning here and surfaced as a hard error to
//! the first caller that actually needs the network.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default OpenWeatherMap REST base.
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

const DEFAULT_CACHE_MINUTES: u64 = 15;
const DEFAULT_CACHE_MAX_ENTRIES: usize = 100;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_LANGUAGE: &str = "es";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Weather service settings, read from the hosting environment at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API credential (`OPENWEATHER_API_KEY`)
    pub api_key: Option<String>,

    /// REST base URL (`OPENWEATHER_BASE_URL`); overridable for tests
    pub base_url: String,

    /// Cache entry time-to-live in minutes (`WEATHER_CACHE_MINUTES`)
    pub cache_minutes: u64,

    /// Maximum number of cache entries before FIFO eviction kicks in
    pub cache_max_entries: usize,

    /// Per-attempt request timeout in seconds
    pub request_timeout_secs: u64,

    /// Total fetch attempts per endpoint (first try included)
    pub max_retries: u32,

    /// Language code forwarded to the upstream API (`lang=` query param)
    pub language: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_minutes: DEFAULT_CACHE_MINUTES,
            cache_max_entries: DEFAULT_CACHE_MAX_ENTRIES,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl WeatherConfig {
    /// Read configuration from environment variables, falling back to
    /// defaults for anything absent or unparsable.
    pub fn from_env() -> Self {
        let api_key = env::var("OPENWEATHER_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        let base_url = env::var("OPENWEATHER_BASE_URL")
            .ok()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let cache_minutes = env::var("WEATHER_CACHE_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_CACHE_MINUTES);

        if api_key.is_none() {
            tracing::warn!("OPENWEATHER_API_KEY not set; requests will fail until configured");
        }
        tracing::debug!(%base_url, cache_minutes, "Weather config loaded from environment");

        Self {
            api_key,
            base_url,
            cache_minutes,
            ..Self::default()
        }
    }

    /// Validate the configuration, collecting errors and warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if self.api_key.is_none() {
            result.add_warning(
                "api_key",
                "OPENWEATHER_API_KEY is not set; weather lookups will be rejected",
            );
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            result.add_error("base_url", "must be an http(s) URL");
        }
        if self.cache_minutes == 0 {
            result.add_warning("cache_minutes", "TTL of 0 disables caching");
        }
        if self.max_retries == 0 {
            result.add_error("max_retries", "at least one attempt is required");
        }

        result
    }

    /// Cache TTL as a [`Duration`].
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_minutes * 60)
    }

    /// Per-attempt request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
