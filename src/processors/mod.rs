//! Pure folds from upstream payloads into dashboard summaries

pub mod market;
pub mod repository;

pub use market::{average_price, top_gainers, top_losers, total_market_cap};
pub use repository::{average_stars, language_histogram};
