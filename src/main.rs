use anyhow::Result;

use clima_core::{ConfigError, WeatherConfig};
use clima_weather::WeatherProvider;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize core
    clima_core::init()?;

    let config = WeatherConfig::from_env();
    let validation = config.validate();
    for warning in &validation.warnings {
        tracing::warn!("{warning}");
    }
    if let Some(first) = validation.errors.first() {
        tracing::error!("Invalid configuration: {}", validation.error_summary());
        let err = ConfigError::InvalidValue {
            field: first.field.clone(),
            message: first.message.clone(),
        };
        anyhow::bail!(err.user_message());
    }

    let city = std::env::args().nth(1).unwrap_or_else(|| "Madrid".to_string());
    let provider = WeatherProvider::new(config)?;

    let data = provider
        .get_current_weather(&city)
        .await
        .map_err(|e| anyhow::anyhow!(e.display_message()))?;

    println!(
        "{}, {} ({}, {})",
        data.location.name, data.location.country, data.location.lat, data.location.lon
    );
    println!(
        "  {}°C (sensación {}°C)  {}  {}",
        data.current.temperature,
        data.current.feels_like,
        data.current.condition,
        data.current.description
    );
    println!(
        "  humedad {}%  presión {} hPa  viento {} km/h  visibilidad {} km",
        data.current.humidity,
        data.current.pressure,
        data.current.wind_speed,
        data.current.visibility
    );

    for day in &data.forecast {
        println!(
            "  {}  {}..{}°C  {}  lluvia {}%",
            day.date, day.temperature.min, day.temperature.max, day.description, day.pop
        );
    }

    Ok(())
}
