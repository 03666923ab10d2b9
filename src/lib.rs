//! Dashboard backend - market, repository and weather summaries over HTTP
//!
//! Aggregates CoinGecko market listings, GitHub repository search and
//! Open-Meteo weather into small JSON payloads for a single-page dashboard.

pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod processors;
pub mod timezone;
pub mod upstream;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use config::DashboardConfig;
pub use error::{ApiError, DashboardError, FailureKind, UpstreamError};
pub use models::{Asset, CityQuery, Coordinates, MarketSummary, Repository, RepositorySummary, WeatherReading};
pub use timezone::TimezoneTable;
pub use weather::WeatherService;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, DashboardError>;
