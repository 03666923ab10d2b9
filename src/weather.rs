//! City weather resolution: geocode, pick country and timezone, fetch current conditions

use std::sync::Arc;

use chrono::Utc;
use rand::RngExt;
use tracing::{info, warn};

use crate::config::DashboardConfig;
use crate::error::{ApiError, FailureKind, UpstreamError, classify};
use crate::models::weather::weather_code_to_description;
use crate::models::{CityQuery, Coordinates, CurrentConditions, Units, WeatherDisplay, WeatherReading};
use crate::timezone::{self, TimezoneTable, UNKNOWN_COUNTRY};
use crate::upstream::WeatherProvider;

const MOCK_DESCRIPTIONS: [&str; 5] = ["Sunny", "Cloudy", "Rainy", "Partly Cloudy", "Clear"];

/// Country and timezone chosen for a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    pub country: String,
    pub timezone: String,
}

pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
    timezones: TimezoneTable,
    units: Units,
    timezone_mode: String,
    fallback_on_failure: bool,
}

impl WeatherService {
    pub fn new(provider: Arc<dyn WeatherProvider>, config: &DashboardConfig) -> Self {
        Self {
            provider,
            timezones: TimezoneTable::with_overrides(&config.timezone_overrides),
            units: Units::from_name(&config.weather.units),
            timezone_mode: config.weather.timezone_mode.clone(),
            fallback_on_failure: config.routes.weather_fallback_on_failure,
        }
    }

    /// Current weather for free-form city input such as `"Belgrade, Serbia"`.
    ///
    /// Upstream 400 and 404 map to their own responses. Any other failure yields
    /// a synthetic reading when fallback is enabled, otherwise a 500.
    pub async fn resolve(&self, input: &str) -> Result<WeatherReading, ApiError> {
        let query = CityQuery::parse(input);

        match self.fetch(&query).await {
            Ok(reading) => Ok(reading),
            Err(err) => match classify(&err) {
                FailureKind::Invalid => Err(ApiError::invalid_city()),
                FailureKind::NotFound => Err(ApiError::city_not_found()),
                FailureKind::Transient if self.fallback_on_failure => {
                    warn!("Weather lookup for '{}' failed ({}), serving mock data", query.city, err);
                    Ok(self.mock_reading(&query))
                }
                FailureKind::Transient => Err(ApiError::upstream("Failed to fetch weather data", &err)),
            },
        }
    }

    async fn fetch(&self, query: &CityQuery) -> Result<WeatherReading, UpstreamError> {
        let coordinates = self
            .provider
            .geocode(&query.city)
            .await?
            .ok_or_else(|| UpstreamError::NoResults(query.city.clone()))?;

        let location = self.resolve_location(query, Some(&coordinates));
        let forecast_timezone = coordinates.timezone.as_deref().unwrap_or(&self.timezone_mode);

        let current = self
            .provider
            .current_conditions(&coordinates, forecast_timezone, self.units)
            .await?;

        info!(
            "Resolved weather for {} ({}) at {}",
            query.city,
            location.country,
            coordinates.format_coordinates()
        );
        Ok(self.reading(query, location, &current))
    }

    /// Explicit country, then geocoder country, then city heuristic.
    /// Timezone comes from the geocoder when present, else the country table.
    #[must_use]
    pub fn resolve_location(&self, query: &CityQuery, coordinates: Option<&Coordinates>) -> ResolvedLocation {
        let country = query
            .country
            .clone()
            .or_else(|| coordinates.and_then(|c| c.country.clone()))
            .or_else(|| self.timezones.guess_country(&query.city).map(str::to_string))
            .unwrap_or_else(|| UNKNOWN_COUNTRY.to_string());

        let timezone = coordinates
            .and_then(|c| c.timezone.clone())
            .unwrap_or_else(|| self.timezones.timezone_for(&country).to_string());

        ResolvedLocation { country, timezone }
    }

    fn reading(&self, query: &CityQuery, location: ResolvedLocation, current: &CurrentConditions) -> WeatherReading {
        let temperature = round_half_up(current.temperature);
        let feels_like = round_half_up(current.feels_like);
        let humidity = round_half_up(current.humidity);
        let pressure = round_half_up(current.pressure);
        let wind_speed = round_half_up(current.wind_speed);
        let description = current
            .weather_code
            .map_or("Unknown", weather_code_to_description);

        self.assemble(
            query,
            location,
            [temperature, feels_like, humidity, pressure, wind_speed],
            description,
            current.weather_code,
        )
    }

    /// Plausible random reading used when the upstream is unavailable
    #[must_use]
    pub fn mock_reading(&self, query: &CityQuery) -> WeatherReading {
        let mut rng = rand::rng();
        let values = [
            rng.random_range(10..=40),
            rng.random_range(10..=40),
            rng.random_range(40..=80),
            rng.random_range(1000..=1200),
            rng.random_range(5..=25),
        ];
        let description = MOCK_DESCRIPTIONS[rng.random_range(0..MOCK_DESCRIPTIONS.len())];

        let location = self.resolve_location(query, None);
        self.assemble(query, location, values, description, None)
    }

    fn assemble(
        &self,
        query: &CityQuery,
        location: ResolvedLocation,
        [temperature, feels_like, humidity, pressure, wind_speed]: [i64; 5],
        description: &str,
        weather_code: Option<i64>,
    ) -> WeatherReading {
        let now = Utc::now();
        WeatherReading {
            city: query.city.clone(),
            local_time: timezone::local_time(&location.timezone, now),
            country: location.country,
            timezone: location.timezone,
            timestamp: now,
            temperature,
            feels_like,
            humidity,
            pressure,
            wind_speed,
            description: description.to_string(),
            weather_code,
            units: self.units,
            display: WeatherDisplay::new(temperature, feels_like, humidity, pressure, wind_speed, self.units),
        }
    }
}

/// Round halves toward positive infinity, so -2.5 becomes -2
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rstest::rstest;

    struct FixedProvider {
        coordinates: Option<Coordinates>,
        forecast_status: Option<u16>,
    }

    #[async_trait]
    impl WeatherProvider for FixedProvider {
        async fn geocode(&self, _city: &str) -> Result<Option<Coordinates>, UpstreamError> {
            Ok(self.coordinates.clone())
        }

        async fn current_conditions(
            &self,
            _coordinates: &Coordinates,
            _timezone: &str,
            _units: Units,
        ) -> Result<CurrentConditions, UpstreamError> {
            if let Some(status) = self.forecast_status {
                return Err(UpstreamError::Status { service: "Open-Meteo forecast", status });
            }
            Ok(CurrentConditions {
                temperature: 12.5,
                feels_like: -2.5,
                humidity: 71.0,
                pressure: 1016.4,
                wind_speed: 14.8,
                weather_code: Some(3),
            })
        }
    }

    fn service(provider: FixedProvider, fallback: bool) -> WeatherService {
        let mut config = DashboardConfig::default();
        config.routes.weather_fallback_on_failure = fallback;
        WeatherService::new(Arc::new(provider), &config)
    }

    fn no_geocoder() -> FixedProvider {
        FixedProvider { coordinates: None, forecast_status: None }
    }

    #[test]
    fn test_explicit_country_picks_table_timezone() {
        let service = service(no_geocoder(), true);
        let location = service.resolve_location(&CityQuery::parse("Belgrade, Serbia"), None);
        assert_eq!(location.country, "Serbia");
        assert_eq!(location.timezone, "Europe/Belgrade");
    }

    #[test]
    fn test_bare_city_uses_heuristic() {
        let service = service(no_geocoder(), true);
        let location = service.resolve_location(&CityQuery::parse("Tokyo"), None);
        assert_eq!(location.country, "Japan");
        assert_eq!(location.timezone, "Asia/Tokyo");
    }

    #[test]
    fn test_geocoder_values_take_precedence() {
        let service = service(no_geocoder(), true);
        let coords = Coordinates {
            latitude: 35.68,
            longitude: 139.69,
            timezone: Some("Asia/Tokyo".into()),
            country: Some("Japan".into()),
        };
        let location = service.resolve_location(&CityQuery::parse("Qxyzzy123"), Some(&coords));
        assert_eq!(location.country, "Japan");
        assert_eq!(location.timezone, "Asia/Tokyo");
    }

    #[test]
    fn test_unknown_city_falls_back_to_utc() {
        let service = service(no_geocoder(), true);
        let location = service.resolve_location(&CityQuery::parse("Qxyzzy123"), None);
        assert_eq!(location.country, UNKNOWN_COUNTRY);
        assert_eq!(location.timezone, "UTC");
    }

    #[rstest]
    #[case(12.5, 13)]
    #[case(12.49, 12)]
    #[case(-2.5, -2)]
    #[case(-2.51, -3)]
    fn test_round_half_up(#[case] value: f64, #[case] expected: i64) {
        assert_eq!(round_half_up(value), expected);
    }

    #[tokio::test]
    async fn test_resolve_normalizes_reading() {
        let provider = FixedProvider {
            coordinates: Some(Coordinates {
                latitude: 44.8,
                longitude: 20.46,
                timezone: Some("Europe/Belgrade".into()),
                country: Some("Serbia".into()),
            }),
            forecast_status: None,
        };
        let reading = service(provider, false).resolve("Belgrade").await.unwrap();
        assert_eq!(reading.temperature, 13);
        assert_eq!(reading.feels_like, -2);
        assert_eq!(reading.pressure, 1016);
        assert_eq!(reading.description, "Overcast");
        assert_eq!(reading.weather_code, Some(3));
        assert!(reading.local_time.is_some());
    }

    #[tokio::test]
    async fn test_empty_geocoding_serves_mock() {
        let reading = service(no_geocoder(), true).resolve("Qxyzzy123").await.unwrap();
        assert!((10..=40).contains(&reading.temperature));
        assert!((10..=40).contains(&reading.feels_like));
        assert!((40..=80).contains(&reading.humidity));
        assert!((1000..=1200).contains(&reading.pressure));
        assert!((5..=25).contains(&reading.wind_speed));
        assert!(MOCK_DESCRIPTIONS.contains(&reading.description.as_str()));
        assert!(reading.weather_code.is_none());
    }

    #[tokio::test]
    async fn test_empty_geocoding_without_fallback_is_500() {
        let err = service(no_geocoder(), false).resolve("Qxyzzy123").await.unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error, "Failed to fetch weather data");
    }

    #[rstest]
    #[case(400, axum::http::StatusCode::BAD_REQUEST, "Invalid city name")]
    #[case(404, axum::http::StatusCode::NOT_FOUND, "City not found")]
    #[tokio::test]
    async fn test_upstream_status_mapping(
        #[case] status: u16,
        #[case] expected: axum::http::StatusCode,
        #[case] error: &str,
    ) {
        let provider = FixedProvider {
            coordinates: Some(Coordinates::new(1.0, 2.0)),
            forecast_status: Some(status),
        };
        let err = service(provider, true).resolve("Somewhere").await.unwrap_err();
        assert_eq!(err.status, expected);
        assert_eq!(err.error, error);
    }
}
