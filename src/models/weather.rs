//! Weather data model and display methods

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::format;

/// Unit system for temperatures and wind speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    /// Parse a unit name, falling back to metric for anything unrecognised
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("imperial") {
            Units::Imperial
        } else {
            Units::Metric
        }
    }
}

/// `current` block of an Open-Meteo forecast response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrentConditions {
    #[serde(rename = "temperature_2m")]
    pub temperature: f64,
    #[serde(rename = "apparent_temperature")]
    pub feels_like: f64,
    #[serde(rename = "relative_humidity_2m")]
    pub humidity: f64,
    #[serde(rename = "pressure_msl")]
    pub pressure: f64,
    #[serde(rename = "wind_speed_10m")]
    pub wind_speed: f64,
    pub weather_code: Option<i64>,
}

/// Weather payload returned by `/api/weather/{city}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReading {
    pub city: String,
    pub country: String,
    pub timezone: String,
    pub timestamp: DateTime<Utc>,
    pub temperature: i64,
    pub feels_like: i64,
    pub humidity: i64,
    pub pressure: i64,
    pub wind_speed: i64,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_code: Option<i64>,
    pub units: Units,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_time: Option<String>,
    pub display: WeatherDisplay,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherDisplay {
    pub temperature: String,
    pub feels_like: String,
    pub humidity: String,
    pub pressure: String,
    pub wind_speed: String,
}

impl WeatherDisplay {
    #[must_use]
    pub fn new(
        temperature: i64,
        feels_like: i64,
        humidity: i64,
        pressure: i64,
        wind_speed: i64,
        units: Units,
    ) -> Self {
        Self {
            temperature: format::format_temperature(temperature as f64, units),
            feels_like: format::format_temperature(feels_like as f64, units),
            humidity: format::format_humidity(humidity),
            pressure: format::format_pressure(pressure),
            wind_speed: format::format_wind_speed(wind_speed, units),
        }
    }
}

/// Convert an Open-Meteo (WMO) weather code to a human-readable description
#[must_use]
pub fn weather_code_to_description(code: i64) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Foggy",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        71 => "Slight snow",
        73 => "Moderate snow",
        75 => "Heavy snow",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        _ => "Unknown",
    }
}
