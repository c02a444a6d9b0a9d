//! Configuration error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API key not configured")]
    MissingApiKey,

    #[error("Invalid config value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl ConfigError {
    /// User-friendly message for UI display.
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingApiKey => {
                "Configuración de API incompleta. Contacta al administrador.".to_string()
            }
            Self::InvalidValue { field, .. } => {
                format!("Configuración inválida ({field}). Contacta al administrador.")
            }
        }
    }
}
