//! Open-Meteo geocoding and forecast client (no API key required)

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::{WeatherProvider, get_json};
use crate::config::DashboardConfig;
use crate::error::UpstreamError;
use crate::models::{Coordinates, CurrentConditions, Units};

const GEOCODING_SERVICE: &str = "Open-Meteo geocoding";
const FORECAST_SERVICE: &str = "Open-Meteo forecast";

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,pressure_msl,wind_speed_10m,weather_code";

pub struct OpenMeteoClient {
    client: reqwest::Client,
    forecast_base_url: String,
    geocoding_base_url: String,
}

impl OpenMeteoClient {
    pub fn new(client: reqwest::Client, config: &DashboardConfig) -> Self {
        Self {
            client,
            forecast_base_url: config.upstream.forecast_base_url.trim_end_matches('/').to_string(),
            geocoding_base_url: config.upstream.geocoding_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn geocoding_url(&self, city: &str) -> String {
        format!(
            "{}/search?name={}&count=1&language=en&format=json",
            self.geocoding_base_url,
            urlencoding::encode(city)
        )
    }

    fn forecast_url(&self, coordinates: &Coordinates, timezone: &str, units: Units) -> String {
        let mut url = format!(
            "{}/forecast?latitude={}&longitude={}&current={}&timezone={}",
            self.forecast_base_url,
            coordinates.latitude,
            coordinates.longitude,
            CURRENT_FIELDS,
            urlencoding::encode(timezone)
        );
        if units == Units::Imperial {
            url.push_str("&temperature_unit=fahrenheit&wind_speed_unit=mph");
        }
        url
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    latitude: f64,
    longitude: f64,
    country: Option<String>,
    timezone: Option<String>,
}

impl From<GeocodingResult> for Coordinates {
    fn from(result: GeocodingResult) -> Self {
        Self {
            latitude: result.latitude,
            longitude: result.longitude,
            timezone: result.timezone.filter(|tz| !tz.is_empty()),
            country: result.country.filter(|c| !c.is_empty()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<CurrentConditions>,
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn geocode(&self, city: &str) -> Result<Option<Coordinates>, UpstreamError> {
        let response: GeocodingResponse =
            get_json(GEOCODING_SERVICE, self.client.get(self.geocoding_url(city))).await?;

        let coordinates = response
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(Coordinates::from);

        if let Some(coordinates) = &coordinates {
            debug!("Geocoded {} to {}", city, coordinates.format_coordinates());
        }
        Ok(coordinates)
    }

    #[instrument(skip(self, coordinates))]
    async fn current_conditions(
        &self,
        coordinates: &Coordinates,
        timezone: &str,
        units: Units,
    ) -> Result<CurrentConditions, UpstreamError> {
        let url = self.forecast_url(coordinates, timezone, units);
        let response: ForecastResponse = get_json(FORECAST_SERVICE, self.client.get(url)).await?;

        response
            .current
            .ok_or_else(|| UpstreamError::malformed(FORECAST_SERVICE, "forecast has no current block"))
    }
}
