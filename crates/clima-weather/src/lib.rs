//! Weather data acquisition for Clima
//!
//! Turns a free-text city name into a validated, normalized, cached weather
//! record via the OpenWeatherMap API, with bounded retries, per-attempt
//! timeouts and input sanitization. The UI renders whatever record or
//! user-displayable error comes back; nothing else lives here.

pub mod cache;
pub mod error;
pub mod fetch;
pub mod model;
pub mod normalize;
pub mod provider;
pub mod sanitize;
pub mod types;

pub use cache::{CacheStats, WeatherCache};
pub use error::WeatherError;
pub use model::WeatherModel;
pub use provider::WeatherProvider;
pub use sanitize::sanitize_city;
pub use types::*;
