use async_trait::async_trait;
use tracing::{info, instrument};

use super::{MarketDataSource, get_json};
use crate::config::DashboardConfig;
use crate::error::UpstreamError;
use crate::models::Asset;

const SERVICE: &str = "CoinGecko";

/// CoinGecko `/coins/markets` client
pub struct CoinGeckoClient {
    client: reqwest::Client,
    base_url: String,
    per_page: u32,
}

impl CoinGeckoClient {
    pub fn new(client: reqwest::Client, config: &DashboardConfig) -> Self {
        Self {
            client,
            base_url: config.upstream.coingecko_base_url.trim_end_matches('/').to_string(),
            per_page: config.limits.crypto_per_page,
        }
    }

    fn markets_url(&self) -> String {
        format!(
            "{}/coins/markets?vs_currency=usd&order=market_cap_desc&per_page={}&page=1&sparkline=false",
            self.base_url, self.per_page
        )
    }
}

#[async_trait]
impl MarketDataSource for CoinGeckoClient {
    #[instrument(skip(self))]
    async fn fetch_markets(&self) -> Result<Vec<Asset>, UpstreamError> {
        let assets: Vec<Asset> = get_json(SERVICE, self.client.get(self.markets_url())).await?;
        info!("Fetched {} assets from {}", assets.len(), SERVICE);
        Ok(assets)
    }
}
