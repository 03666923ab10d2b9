//! Data models for the dashboard backend
//!
//! Upstream records and the summary shapes returned to the frontend:
//! - Market: CoinGecko assets and the market summary
//! - Repository: GitHub search results and the repository summary
//! - Location: parsed city input and geocoded coordinates
//! - Weather: current conditions and the weather reading

pub mod location;
pub mod market;
pub mod repository;
pub mod weather;

// Re-export all public types for convenient access
pub use location::{CityQuery, Coordinates};
pub use market::{Asset, MarketDisplay, MarketSummary};
pub use repository::{Repository, RepositoryDisplay, RepositorySummary};
pub use weather::{CurrentConditions, Units, WeatherDisplay, WeatherReading};
