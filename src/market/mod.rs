//! Market data access: CoinGecko client, response models, error taxonomy.

pub mod client;
pub mod error;
pub mod models;

pub use client::MarketClient;
pub use error::MarketError;

use std::sync::Arc;

use async_trait::async_trait;

use models::{MarketEntry, PriceSnapshot, SearchHit};

/// Read seam over the market data provider, so handler logic can be exercised
/// without the network.
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Price snapshot for one identifier; `Ok(None)` when unknown upstream.
    async fn snapshot(&self, id: &str) -> Result<Option<PriceSnapshot>, MarketError>;

    /// Top `limit` assets by market capitalization descending.
    async fn ranked(&self, limit: usize) -> Result<Vec<MarketEntry>, MarketError>;

    /// Free-text search, truncated provider-side ordering preserved.
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, MarketError>;

    /// Top risers of the last hour.
    async fn top_gainers(&self) -> Result<Vec<MarketEntry>, MarketError>;
}

#[async_trait]
impl<M: MarketData + ?Sized> MarketData for Arc<M> {
    async fn snapshot(&self, id: &str) -> Result<Option<PriceSnapshot>, MarketError> {
        (**self).snapshot(id).await
    }

    async fn ranked(&self, limit: usize) -> Result<Vec<MarketEntry>, MarketError> {
        (**self).ranked(limit).await
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, MarketError> {
        (**self).search(query).await
    }

    async fn top_gainers(&self) -> Result<Vec<MarketEntry>, MarketError> {
        (**self).top_gainers().await
    }
}
