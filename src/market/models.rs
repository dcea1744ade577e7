//! Serde models for CoinGecko API responses.
//!
//! Numeric fields are `Option` because the provider omits or nulls them for
//! thinly traded assets; a sparse row must still decode and render.

use serde::Deserialize;

/// Single-asset quote from `/simple/price`. The response is keyed by asset
/// identifier upstream; this is one value of that map.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PriceSnapshot {
    #[serde(default)]
    pub usd: Option<f64>,
    #[serde(rename = "try", default)]
    pub try_price: Option<f64>,
    #[serde(rename = "usd_24h_change", default)]
    pub change_24h: Option<f64>,
    #[serde(rename = "usd_market_cap", default)]
    pub market_cap: Option<f64>,
    #[serde(rename = "usd_24h_vol", default)]
    pub volume_24h: Option<f64>,
}

/// One row from `/coins/markets`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_1h_in_currency: Option<f64>,
}

impl MarketEntry {
    pub fn price(&self) -> f64 {
        self.current_price.unwrap_or(0.0)
    }

    pub fn change_24h(&self) -> f64 {
        self.price_change_percentage_24h.unwrap_or(0.0)
    }

    pub fn change_1h(&self) -> f64 {
        self.price_change_percentage_1h_in_currency.unwrap_or(0.0)
    }
}

/// One hit from `/search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
}

/// Envelope of `/search`; only the coin hits are consumed.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub coins: Vec<SearchHit>,
}

/// Sort by 1-hour change descending and keep the top `take` rows.
///
/// This is a different shaping rule from the provider-side market-cap order
/// the listing endpoints use.
pub fn top_gainers(mut entries: Vec<MarketEntry>, take: usize) -> Vec<MarketEntry> {
    entries.sort_by(|a, b| b.change_1h().total_cmp(&a.change_1h()));
    entries.truncate(take);
    entries
}
