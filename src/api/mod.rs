use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Request, State},
    middleware::{self, Next},
    response::{Json, Response},
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, warn};

use crate::{
    DashboardError,
    config::DashboardConfig,
    error::ApiError,
    models::{MarketSummary, RepositorySummary, WeatherReading},
    processors,
    upstream::{self, CoinGeckoClient, GitHubClient, MarketDataSource, OpenMeteoClient, RepositorySource, WeatherProvider},
    weather::WeatherService,
};

const MIN_CITY_LENGTH: usize = 2;

/// Shared handler state; sources are trait objects so tests can swap in fakes
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<DashboardConfig>,
    pub markets: Arc<dyn MarketDataSource>,
    pub repositories: Arc<dyn RepositorySource>,
    pub weather: Arc<WeatherService>,
}

impl AppState {
    pub fn new(
        config: DashboardConfig,
        markets: Arc<dyn MarketDataSource>,
        repositories: Arc<dyn RepositorySource>,
        weather_provider: Arc<dyn WeatherProvider>,
    ) -> Self {
        let weather = Arc::new(WeatherService::new(weather_provider, &config));
        Self {
            config: Arc::new(config),
            markets,
            repositories,
            weather,
        }
    }

    /// Wire the real CoinGecko, GitHub and Open-Meteo clients
    pub fn from_config(config: DashboardConfig) -> crate::Result<Self> {
        let client = upstream::http_client(&config)?;
        let markets = Arc::new(CoinGeckoClient::new(client.clone(), &config));
        let repositories = Arc::new(GitHubClient::new(client.clone(), &config));
        let weather = Arc::new(OpenMeteoClient::new(client, &config));
        Ok(Self::new(config, markets, repositories, weather))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontendSettings {
    pub api_base_url: String,
    pub ip_geolocation_url: String,
    pub default_units: String,
    pub timezone: String,
}

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// Routes mounted under `/api`
pub fn router(state: AppState) -> Router {
    let city_routes = Router::new()
        .route("/weather/{city}", get(get_weather))
        .route_layer(middleware::from_fn(validate_city));

    Router::new()
        .route("/crypto", get(get_crypto))
        .route("/github", get(get_github))
        .route("/weather", get(missing_city))
        .route("/config", get(get_config))
        .merge(city_routes)
        .with_state(state)
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "OK",
        timestamp: Utc::now(),
    })
}

/// Reject blank or one-letter city names before any upstream call
pub fn validate_city_name(city: &str) -> crate::Result<()> {
    let city = city.trim();
    if city.is_empty() {
        return Err(DashboardError::validation("City parameter is required"));
    }
    if city.chars().count() < MIN_CITY_LENGTH {
        return Err(DashboardError::validation(
            "City name must be at least 2 characters long",
        ));
    }
    Ok(())
}

async fn validate_city(
    Path(city): Path<String>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    validate_city_name(&city)?;
    Ok(next.run(request).await)
}

async fn missing_city() -> ApiError {
    DashboardError::validation("City parameter is required").into()
}

async fn get_crypto(State(state): State<AppState>) -> Result<Json<MarketSummary>, ApiError> {
    let limit = state.config.limits.top_movers;
    match state.markets.fetch_markets().await {
        Ok(assets) => Ok(Json(processors::market::summarize(assets, limit))),
        Err(err) if state.config.routes.crypto_fallback_on_failure => {
            warn!("Crypto fetch failed ({}), serving mock data", err);
            Ok(Json(processors::market::summarize(
                processors::market::mock_assets(),
                limit,
            )))
        }
        Err(err) => {
            error!("Crypto fetch failed: {}", err);
            Err(ApiError::upstream("Failed to fetch cryptocurrency data", &err))
        }
    }
}

async fn get_github(State(state): State<AppState>) -> Result<Json<RepositorySummary>, ApiError> {
    let limit = state.config.limits.top_repos;
    match state.repositories.search_repositories().await {
        Ok(repos) => Ok(Json(processors::repository::summarize(repos, limit))),
        Err(err) if state.config.routes.github_fallback_on_failure => {
            warn!("GitHub fetch failed ({}), serving mock data", err);
            let mock = processors::repository::mock_repositories(state.config.limits.github_per_page as usize);
            Ok(Json(processors::repository::summarize(mock, limit)))
        }
        Err(err) => {
            error!("GitHub fetch failed: {}", err);
            Err(ApiError::upstream("Failed to fetch GitHub data", &err))
        }
    }
}

async fn get_weather(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<WeatherReading>, ApiError> {
    state.weather.resolve(&city).await.map(Json)
}

async fn get_config(State(state): State<AppState>) -> Json<FrontendSettings> {
    let config = &state.config;
    Json(FrontendSettings {
        api_base_url: config.frontend.api_base_url.clone(),
        ip_geolocation_url: config.frontend.ip_geolocation_url.clone(),
        default_units: config.weather.units.clone(),
        timezone: config.weather.timezone_mode.clone(),
    })
}
