//! Market data model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::format::Percentage;

/// One coin from the CoinGecko `/coins/markets` listing.
///
/// Only the fields the processor reads are typed; everything else is kept in
/// `extra` so the asset is passed through to the frontend unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Asset {
    #[must_use]
    pub fn new(id: &str, market_cap: f64, current_price: f64, change_24h: Option<f64>) -> Self {
        Self {
            id: id.to_string(),
            symbol: id.chars().take(3).collect(),
            name: id.to_string(),
            current_price: Some(current_price),
            market_cap: Some(market_cap),
            price_change_percentage_24h: change_24h,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSummary {
    pub total_market_cap: f64,
    pub average_price: f64,
    pub top_gainers: Vec<Asset>,
    pub top_losers: Vec<Asset>,
    pub coins: Vec<Asset>,
    pub display: MarketDisplay,
}

/// Formatted strings; `top_gainers` / `top_losers` align index-wise with the lists above
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketDisplay {
    pub total_market_cap: String,
    pub average_price: String,
    pub top_gainers: Vec<Percentage>,
    pub top_losers: Vec<Percentage>,
}
