//! Weather-specific error types.
//!
//! `Display` stays technical for logs; `user_message()` returns the Spanish
//! strings the UI shows, and `display_message()` adds the service-level
//! prefix for failures that came out of the fetch/normalize pipeline.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("API key not configured")]
    MissingApiKey,

    #[error("Invalid city name")]
    InvalidCity,

    #[error("City not found")]
    CityNotFound,

    #[error("API key rejected (401)")]
    InvalidApiKey,

    #[error("Rate limited (429)")]
    RateLimited,

    #[error("Request timed out")]
    Timeout,

    #[error("Upstream server error: HTTP {0}")]
    ServerError(u16),

    #[error("Unexpected HTTP status {0}")]
    Http(u16),

    #[error("Connection failed after multiple attempts")]
    RetriesExhausted,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Processing error: {0}")]
    Processing(String),
}

impl WeatherError {
    /// User-facing message, matching the product's Spanish locale.
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingApiKey => {
                "Configuración de API incompleta. Contacta al administrador.".to_string()
            }
            Self::InvalidCity => "Nombre de ciudad inválido.".to_string(),
            Self::CityNotFound => {
                "Ciudad no encontrada. Verifica el nombre e intenta nuevamente.".to_string()
            }
            Self::InvalidApiKey => "Clave API inválida. Contacta al administrador.".to_string(),
            Self::RateLimited => "Límite de solicitudes excedido. Intenta más tarde.".to_string(),
            Self::Timeout => {
                "Tiempo de espera agotado. Verifica tu conexión a internet.".to_string()
            }
            Self::ServerError(_) => "Error del servidor meteorológico. Intenta más tarde.".to_string(),
            Self::Http(status) => format!("Error HTTP {status}."),
            Self::RetriesExhausted | Self::Network(_) => {
                "Error de conexión después de múltiples intentos.".to_string()
            }
            Self::Processing(_) => "Error al procesar datos meteorológicos.".to_string(),
        }
    }

    /// Message as shown by the UI layer. Pipeline failures get the stable
    /// service prefix; validation and configuration errors happen before
    /// the pipeline and are shown as-is.
    pub fn display_message(&self) -> String {
        match self {
            Self::MissingApiKey | Self::InvalidCity => self.user_message(),
            _ => format!("Error del servicio meteorológico: {}", self.user_message()),
        }
    }

    /// Whether the retry loop may try this failure again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout | Self::ServerError(_) | Self::Http(_) | Self::Network(_)
        )
    }

    /// Terminal upstream classifications: retrying cannot help.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::CityNotFound | Self::InvalidApiKey | Self::RateLimited
        )
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_user_messages() {
        assert!(WeatherError::CityNotFound.user_message().contains("Ciudad"));
        assert!(WeatherError::RateLimited.user_message().contains("Límite"));
        assert!(WeatherError::Timeout.user_message().contains("espera"));
    }

    #[test]
    fn test_display_message_prefixes_pipeline_errors() {
        let msg = WeatherError::CityNotFound.display_message();
        assert!(msg.starts_with("Error del servicio meteorológico:"));
        assert!(msg.contains("Ciudad no encontrada"));
    }

    #[test]
    fn test_display_message_leaves_validation_errors_bare() {
        assert_eq!(
            WeatherError::InvalidCity.display_message(),
            "Nombre de ciudad inválido."
        );
        assert!(!WeatherError::MissingApiKey
            .display_message()
            .starts_with("Error del servicio"));
    }

    #[test]
    fn test_retry_classification() {
        assert!(WeatherError::ServerError(503).is_retryable());
        assert!(WeatherError::Timeout.is_retryable());
        assert!(!WeatherError::CityNotFound.is_retryable());
        assert!(WeatherError::CityNotFound.is_terminal());
        assert!(WeatherError::InvalidApiKey.is_terminal());
        assert!(WeatherError::RateLimited.is_terminal());
        assert!(!WeatherError::ServerError(500).is_terminal());
    }
}
