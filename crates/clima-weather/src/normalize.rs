//! Maps raw OpenWeatherMap payloads into the normalized weather record.
//!
//! Pure and total over well-formed-but-sparse input: every optional upstream
//! field falls back to the defaults documented in [`crate::types::defaults`],
//! units are converted for display (m/s → km/h, m → km) and floats rounded
//! to integers. Forecast samples are aggregated into at most five daily
//! summaries keyed by UTC calendar date.

use chrono::{DateTime, NaiveDate};

use crate::types::{
    defaults, CurrentConditions, CurrentResponse, DailyTemperature, ForecastDay, ForecastItem,
    ForecastResponse, LocationInfo, WeatherData, WeatherDesc,
};

/// Maximum number of forecast days in a record.
const MAX_FORECAST_DAYS: usize = 5;

fn round(v: f64) -> i32 {
    v.round() as i32
}

fn percent(v: f64) -> u8 {
    v.round().clamp(0.0, 100.0) as u8
}

fn condition_of(desc: Option<&WeatherDesc>) -> (String, String, String) {
    (
        desc.and_then(|d| d.main.clone())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| defaults::CONDITION.to_string()),
        desc.and_then(|d| d.description.clone())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| defaults::DESCRIPTION.to_string()),
        desc.and_then(|d| d.icon.clone())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| defaults::ICON.to_string()),
    )
}

/// Build the normalized record from the two raw endpoint payloads.
pub fn normalize(current: &CurrentResponse, forecast: &ForecastResponse) -> WeatherData {
    let main = current.main.as_ref();
    let wind = current.wind.as_ref();
    let (condition, description, icon) =
        condition_of(current.weather.as_ref().and_then(|w| w.first()));

    WeatherData {
        location: LocationInfo {
            name: current
                .name
                .clone()
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| defaults::LOCATION_NAME.to_string()),
            country: current
                .sys
                .as_ref()
                .and_then(|s| s.country.clone())
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| defaults::COUNTRY.to_string()),
            lat: current.coord.as_ref().and_then(|c| c.lat).unwrap_or(0.0),
            lon: current.coord.as_ref().and_then(|c| c.lon).unwrap_or(0.0),
        },
        current: CurrentConditions {
            temperature: round(main.and_then(|m| m.temp).unwrap_or(0.0)),
            feels_like: round(main.and_then(|m| m.feels_like).unwrap_or(0.0)),
            humidity: percent(main.and_then(|m| m.humidity).unwrap_or(0.0)),
            pressure: round(main.and_then(|m| m.pressure).unwrap_or(0.0)),
            // m/s to km/h
            wind_speed: round(wind.and_then(|w| w.speed).unwrap_or(0.0) * 3.6),
            wind_direction: round(wind.and_then(|w| w.deg).unwrap_or(0.0)),
            // meters to km
            visibility: round(current.visibility.unwrap_or(0.0) / 1000.0),
            condition,
            description,
            icon,
        },
        forecast: process_forecast(&forecast.list),
    }
}

/// Partition the flat 3-hourly sample list into per-date groups and compute
/// a [`ForecastDay`] aggregate for each, keeping first-seen order (upstream
/// samples arrive pre-sorted by time, so this is chronological) and keeping
/// at most the first five dates.
pub fn process_forecast(list: &[ForecastItem]) -> Vec<ForecastDay> {
    let mut groups: Vec<(NaiveDate, Vec<&ForecastItem>)> = Vec::new();

    for item in list {
        let Some(dt) = item.dt else { continue };
        let Some(date) = DateTime::from_timestamp(dt, 0).map(|t| t.date_naive()) else {
            continue;
        };
        match groups.iter_mut().find(|(d, _)| *d == date) {
            Some((_, samples)) => samples.push(item),
            None => groups.push((date, vec![item])),
        }
    }

    groups
        .into_iter()
        .take(MAX_FORECAST_DAYS)
        .map(|(date, samples)| aggregate_day(date, &samples))
        .collect()
}

fn aggregate_day(date: NaiveDate, samples: &[&ForecastItem]) -> ForecastDay {
    let Some(first) = samples.first() else {
        return ForecastDay::empty(date);
    };

    let temps: Vec<f64> = samples
        .iter()
        .map(|s| s.main.as_ref().and_then(|m| m.temp).unwrap_or(0.0))
        .collect();
    let min = temps.iter().copied().fold(f64::INFINITY, f64::min);
    let max = temps.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    // Representative sample: the one nearest the midpoint of the day's list.
    // Arbitrary but kept for compatibility with the shipped behavior.
    let mid = samples.get(samples.len() / 2).unwrap_or(first);
    let (condition, description, icon) = condition_of(mid.weather.as_ref().and_then(|w| w.first()));

    let count = samples.len() as f64;
    let humidity_mean = samples
        .iter()
        .map(|s| s.main.as_ref().and_then(|m| m.humidity).unwrap_or(0.0))
        .sum::<f64>()
        / count;
    let wind_mean = samples
        .iter()
        .map(|s| s.wind.as_ref().and_then(|w| w.speed).unwrap_or(0.0))
        .sum::<f64>()
        / count;
    let pop_max = samples
        .iter()
        .map(|s| s.pop.unwrap_or(0.0))
        .fold(0.0, f64::max);

    ForecastDay {
        date,
        temperature: DailyTemperature {
            min: round(min),
            max: round(max),
        },
        condition,
        description,
        icon,
        humidity: percent(humidity_mean),
        wind_speed: round(wind_mean * 3.6),
        pop: percent(pop_max * 100.0),
    }
}
