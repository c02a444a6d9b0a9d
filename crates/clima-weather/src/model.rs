//! UI-facing state holder over the provider.
//!
//! Mirrors what a search screen needs: the last record, a displayable error
//! string, and a loading flag. The host UI triggers `fetch_weather` on
//! submit/startup and `clear_error` on dismissal; it never sees raw
//! transport or parsing errors.

use crate::provider::WeatherProvider;
use crate::types::WeatherData;

pub struct WeatherModel {
    provider: WeatherProvider,
    data: Option<WeatherData>,
    error: Option<String>,
    loading: bool,
}

impl WeatherModel {
    pub fn new(provider: WeatherProvider) -> Self {
        Self {
            provider,
            data: None,
            error: None,
            loading: false,
        }
    }

    /// Look up a city and update the model state. Blank input is a no-op;
    /// a failure replaces the record with a displayable error message.
    pub async fn fetch_weather(&mut self, city: &str) {
        if city.trim().is_empty() {
            return;
        }

        self.loading = true;
        self.error = None;

        match self.provider.get_current_weather(city).await {
            Ok(data) => {
                self.data = Some(data);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Weather fetch failed");
                self.error = Some(e.display_message());
                self.data = None;
            }
        }

        self.loading = false;
    }

    /// UI-driven error dismissal.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn data(&self) -> Option<&WeatherData> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use clima_core::WeatherConfig;

    fn model_without_key() -> WeatherModel {
        let provider = WeatherProvider::new(WeatherConfig::default()).unwrap();
        WeatherModel::new(provider)
    }

    #[tokio::test]
    async fn test_blank_input_is_noop() {
        let mut model = model_without_key();
        model.fetch_weather("   ").await;
        assert!(model.data().is_none());
        assert!(model.error().is_none());
        assert!(!model.is_loading());
    }

    #[tokio::test]
    async fn test_failure_surfaces_displayable_message() {
        let mut model = model_without_key();
        model.fetch_weather("Madrid").await;
        assert!(model.data().is_none());
        assert_eq!(
            model.error().unwrap(),
            "Configuración de API incompleta. Contacta al administrador."
        );
    }

    #[tokio::test]
    async fn test_clear_error() {
        let mut model = model_without_key();
        model.fetch_weather("Madrid").await;
        assert!(model.error().is_some());
        model.clear_error();
        assert!(model.error().is_none());
    }
}
