use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fallback strings for fields the upstream API may omit. Listed once so
/// every defaulted path is documented in a single place.
pub mod defaults {
    /// Location name when upstream omits `name`
    pub const LOCATION_NAME: &str = "Desconocido";
    /// Country code when upstream omits `sys.country`
    pub const COUNTRY: &str = "N/A";
    /// Condition keyword when upstream omits `weather[0].main`
    pub const CONDITION: &str = "Unknown";
    /// Free-text description when upstream omits `weather[0].description`
    pub const DESCRIPTION: &str = "Sin descripción";
    /// Description for a synthesized empty forecast day
    pub const NO_DATA: &str = "Sin datos";
    /// Icon code when upstream omits `weather[0].icon`
    pub const ICON: &str = "01d";
}

/// Where the measurements were taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub name: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

/// Current conditions, converted to display units (°C, km/h, km, hPa).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature: i32,
    pub feels_like: i32,
    pub humidity: u8,
    pub pressure: i32,
    pub wind_speed: i32,
    pub wind_direction: i32,
    pub visibility: i32,
    pub condition: String,
    pub description: String,
    pub icon: String,
}

/// Min/max temperature over one forecast day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTemperature {
    pub min: i32,
    pub max: i32,
}

/// Aggregate over all 3-hourly samples sharing one UTC calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub temperature: DailyTemperature,
    pub condition: String,
    pub description: String,
    pub icon: String,
    pub humidity: u8,
    pub wind_speed: i32,
    /// Precipitation probability, percent
    pub pop: u8,
}

impl ForecastDay {
    /// Placeholder for a date whose sample list turned out empty.
    /// Should not occur with well-formed upstream data, but guarded.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            temperature: DailyTemperature { min: 0, max: 0 },
            condition: defaults::CONDITION.to_string(),
            description: defaults::NO_DATA.to_string(),
            icon: defaults::ICON.to_string(),
            humidity: 0,
            wind_speed: 0,
            pop: 0,
        }
    }
}

/// Complete normalized weather record: current conditions plus at most
/// five forecast days in ascending date order. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherData {
    pub location: LocationInfo,
    pub current: CurrentConditions,
    pub forecast: Vec<ForecastDay>,
}

// ---------------------------------------------------------------------------
// Upstream API payloads (OpenWeatherMap `/weather` and `/forecast`).
// Every field the provider is allowed to omit is optional here; the
// normalizer applies the documented defaults.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Coord {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherDesc {
    pub main: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainMetrics {
    pub temp: Option<f64>,
    pub feels_like: Option<f64>,
    pub pressure: Option<f64>,
    pub humidity: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Wind {
    pub speed: Option<f64>,
    pub deg: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sys {
    pub country: Option<String>,
}

/// `/weather` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentResponse {
    pub name: Option<String>,
    pub coord: Option<Coord>,
    pub weather: Option<Vec<WeatherDesc>>,
    pub main: Option<MainMetrics>,
    pub wind: Option<Wind>,
    pub sys: Option<Sys>,
    /// Meters
    pub visibility: Option<f64>,
}

/// One 3-hourly sample from `/forecast`.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastItem {
    /// Unix timestamp, seconds
    pub dt: Option<i64>,
    pub main: Option<MainMetrics>,
    pub weather: Option<Vec<WeatherDesc>>,
    pub wind: Option<Wind>,
    /// Precipitation probability, 0.0..=1.0
    pub pop: Option<f64>,
}

/// `/forecast` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub list: Vec<ForecastItem>,
}
