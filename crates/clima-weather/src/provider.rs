//! Weather acquisition service: sanitize → cache → fetch both endpoints →
//! normalize → cache → return.

use reqwest::Client;

use clima_core::WeatherConfig;

use crate::cache::{CacheStats, WeatherCache};
use crate::error::WeatherError;
use crate::fetch::{fetch_with_retry, RetryConfig};
use crate::normalize::normalize;
use crate::sanitize::sanitize_city;
use crate::types::{CurrentResponse, ForecastResponse, WeatherData};

const USER_AGENT: &str = concat!("clima/", env!("CARGO_PKG_VERSION"));

pub struct WeatherProvider {
    client: Client,
    config: WeatherConfig,
    retry: RetryConfig,
    cache: WeatherCache,
}

impl WeatherProvider {
    /// Build a provider from config. The per-attempt timeout and client
    /// identifier are fixed on the HTTP client here.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(USER_AGENT)
            .build()?;

        let cache = WeatherCache::new(config.cache_ttl(), config.cache_max_entries);
        let retry = RetryConfig::new(config.max_retries, crate::fetch::DEFAULT_INITIAL_DELAY_MS);

        Ok(Self {
            client,
            config,
            retry,
            cache,
        })
    }

    /// Resolve a free-text city name to a normalized weather record.
    ///
    /// Rejects empty input and a missing credential before any I/O. A cache
    /// hit resolves without touching the network; a miss fetches the
    /// current-conditions and forecast endpoints concurrently, fails the
    /// whole call if either fails, and stores the normalized result.
    ///
    /// # Errors
    ///
    /// Returns a classified [`WeatherError`]; `display_message()` yields the
    /// user-facing text.
    pub async fn get_current_weather(&self, city: &str) -> Result<WeatherData, WeatherError> {
        if city.trim().is_empty() {
            return Err(WeatherError::InvalidCity);
        }
        let api_key = self.config.api_key.as_deref().ok_or(WeatherError::MissingApiKey)?;

        let sanitized = sanitize_city(city);
        if sanitized.is_empty() {
            return Err(WeatherError::InvalidCity);
        }

        let cache_key = format!("current-{}", sanitized.to_lowercase());
        if let Some(data) = self.cache.get(&cache_key) {
            tracing::debug!(city = %sanitized, "Weather served from cache");
            return Ok(data);
        }

        tracing::info!(city = %sanitized, "Fetching weather data");
        let encoded = urlencoding::encode(&sanitized);
        let current_url = format!(
            "{}/weather?q={}&appid={}&units=metric&lang={}",
            self.config.base_url, encoded, api_key, self.config.language
        );
        let forecast_url = format!(
            "{}/forecast?q={}&appid={}&units=metric&lang={}",
            self.config.base_url, encoded, api_key, self.config.language
        );

        // Both endpoints for the same city; either failure fails the call.
        let (current_resp, forecast_resp) = tokio::join!(
            fetch_with_retry(&self.client, &current_url, &self.retry),
            fetch_with_retry(&self.client, &forecast_url, &self.retry),
        );
        let current_resp = current_resp?;
        let forecast_resp = forecast_resp?;

        let current: CurrentResponse = current_resp
            .json()
            .await
            .map_err(|e| WeatherError::Processing(e.to_string()))?;
        let forecast: ForecastResponse = forecast_resp
            .json()
            .await
            .map_err(|e| WeatherError::Processing(e.to_string()))?;

        let data = normalize(&current, &forecast);
        self.cache.set(&cache_key, data.clone());
        tracing::debug!(city = %sanitized, days = data.forecast.len(), "Weather record cached");

        Ok(data)
    }

    /// Drop all cached records.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Cache observability passthrough.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    fn config_without_key() -> WeatherConfig {
        WeatherConfig::default()
    }

    #[tokio::test]
    async fn test_empty_city_rejected_before_io() {
        let provider = WeatherProvider::new(config_without_key()).unwrap();
        let err = provider.get_current_weather("   ").await.unwrap_err();
        assert!(matches!(err, WeatherError::InvalidCity));
    }

    #[tokio::test]
    async fn test_missing_api_key_rejected_before_io() {
        let provider = WeatherProvider::new(config_without_key()).unwrap();
        let err = provider.get_current_weather("Madrid").await.unwrap_err();
        assert!(matches!(err, WeatherError::MissingApiKey));
    }

    #[tokio::test]
    async fn test_input_that_sanitizes_to_empty_is_rejected() {
        let config = WeatherConfig {
            api_key: Some("test-key".to_string()),
            ..WeatherConfig::default()
        };
        let provider = WeatherProvider::new(config).unwrap();
        let err = provider.get_current_weather("\"''\"").await.unwrap_err();
        assert!(matches!(err, WeatherError::InvalidCity));
    }
}
