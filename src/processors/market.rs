use rand::RngExt;

use crate::format::{format_currency, format_percentage};
use crate::models::{Asset, MarketDisplay, MarketSummary};

/// Sum of capitalizations; missing values count as zero.
#[must_use]
pub fn total_market_cap(assets: &[Asset]) -> f64 {
    // f64's Sum starts from -0.0, which would render as "$-0.00"
    assets
        .iter()
        .fold(0.0, |acc, a| acc + a.market_cap.unwrap_or(0.0))
}

/// Mean current price, or zero when there is nothing to average.
#[must_use]
pub fn average_price(assets: &[Asset]) -> f64 {
    if assets.is_empty() {
        return 0.0;
    }
    let sum = assets
        .iter()
        .fold(0.0, |acc, a| acc + a.current_price.unwrap_or(0.0));
    sum / assets.len() as f64
}

/// Assets with a strictly positive 24h change, largest first.
#[must_use]
pub fn top_gainers(assets: &[Asset], limit: usize) -> Vec<Asset> {
    let mut gainers: Vec<Asset> = assets
        .iter()
        .filter(|a| a.price_change_percentage_24h.is_some_and(|c| c > 0.0))
        .cloned()
        .collect();
    // sort_by is stable, so equal changes keep their listing order
    gainers.sort_by(|a, b| change(b).total_cmp(&change(a)));
    gainers.truncate(limit);
    gainers
}

/// Assets with a strictly negative 24h change, largest drop first.
#[must_use]
pub fn top_losers(assets: &[Asset], limit: usize) -> Vec<Asset> {
    let mut losers: Vec<Asset> = assets
        .iter()
        .filter(|a| a.price_change_percentage_24h.is_some_and(|c| c < 0.0))
        .cloned()
        .collect();
    losers.sort_by(|a, b| change(a).total_cmp(&change(b)));
    losers.truncate(limit);
    losers
}

fn change(asset: &Asset) -> f64 {
    asset.price_change_percentage_24h.unwrap_or(0.0)
}

/// Build the `/api/crypto` payload.
#[must_use]
pub fn summarize(assets: Vec<Asset>, limit: usize) -> MarketSummary {
    let total = total_market_cap(&assets);
    let average = average_price(&assets);
    let top_gainers = top_gainers(&assets, limit);
    let top_losers = top_losers(&assets, limit);

    let display = MarketDisplay {
        total_market_cap: format_currency(total),
        average_price: format_currency(average),
        top_gainers: top_gainers.iter().map(|a| format_percentage(change(a))).collect(),
        top_losers: top_losers.iter().map(|a| format_percentage(change(a))).collect(),
    };

    MarketSummary {
        total_market_cap: total,
        average_price: average,
        top_gainers,
        top_losers,
        coins: assets,
        display,
    }
}

const MOCK_COINS: &[(&str, &str, &str)] = &[
    ("bitcoin", "btc", "Bitcoin"),
    ("ethereum", "eth", "Ethereum"),
    ("tether", "usdt", "Tether"),
    ("solana", "sol", "Solana"),
    ("ripple", "xrp", "XRP"),
    ("cardano", "ada", "Cardano"),
    ("dogecoin", "doge", "Dogecoin"),
    ("polkadot", "dot", "Polkadot"),
];

/// Synthetic market listing for when CoinGecko is unavailable.
#[must_use]
pub fn mock_assets() -> Vec<Asset> {
    let mut rng = rand::rng();
    MOCK_COINS
        .iter()
        .map(|(id, symbol, name)| {
            let price: f64 = rng.random_range(0.1..70_000.0);
            let supply: f64 = rng.random_range(1e7..1e10);
            let change: f64 = rng.random_range(-10.0..10.0);
            Asset {
                id: (*id).to_string(),
                symbol: (*symbol).to_string(),
                name: (*name).to_string(),
                current_price: Some(price),
                market_cap: Some(price * supply),
                price_change_percentage_24h: Some(change),
                extra: serde_json::Map::new(),
            }
        })
        .collect()
}
