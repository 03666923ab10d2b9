//! Clients for the third-party APIs behind the dashboard
//!
//! Every client goes through one shared `reqwest::Client` carrying the
//! configured timeout. Nothing is retried or cached.

use std::time::Instant;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::DashboardConfig;
use crate::error::UpstreamError;
use crate::models::{Asset, Coordinates, CurrentConditions, Repository, Units};
use crate::DashboardError;

pub mod coingecko;
pub mod github;
pub mod open_meteo;

pub use coingecko::CoinGeckoClient;
pub use github::GitHubClient;
pub use open_meteo::OpenMeteoClient;

const USER_AGENT: &str = concat!("dashboard-backend/", env!("CARGO_PKG_VERSION"));
const SLOW_RESPONSE_SECS: f64 = 5.0;

/// Source of cryptocurrency market listings
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn fetch_markets(&self) -> Result<Vec<Asset>, UpstreamError>;
}

/// Source of ranked repository search results
#[async_trait]
pub trait RepositorySource: Send + Sync {
    async fn search_repositories(&self) -> Result<Vec<Repository>, UpstreamError>;
}

/// Geocoding plus current-conditions lookup
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Best match for a city name, `None` when the geocoder knows nothing
    async fn geocode(&self, city: &str) -> Result<Option<Coordinates>, UpstreamError>;

    async fn current_conditions(
        &self,
        coordinates: &Coordinates,
        timezone: &str,
        units: Units,
    ) -> Result<CurrentConditions, UpstreamError>;
}

/// Build the HTTP client shared by all upstream clients
pub fn http_client(config: &DashboardConfig) -> crate::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.request_timeout())
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| DashboardError::config(format!("Failed to create HTTP client: {e}")))
}

/// Send a GET, require a success status and decode the JSON body
pub(crate) async fn get_json<T: DeserializeOwned>(
    service: &'static str,
    request: reqwest::RequestBuilder,
) -> Result<T, UpstreamError> {
    let start_time = Instant::now();

    let response = request
        .send()
        .await
        .map_err(|e| UpstreamError::transport(service, e))?;

    let status = response.status();
    if !status.is_success() {
        warn!("{} responded with HTTP {}", service, status.as_u16());
        return Err(UpstreamError::Status {
            service,
            status: status.as_u16(),
        });
    }

    let body = response
        .json::<T>()
        .await
        .map_err(|e| UpstreamError::malformed(service, e.to_string()))?;

    let elapsed = start_time.elapsed().as_secs_f64();
    debug!("{} answered in {:.3}s", service, elapsed);
    if elapsed > SLOW_RESPONSE_SECS {
        warn!("Slow {} response detected: {:.3}s", service, elapsed);
    }

    Ok(body)
}
