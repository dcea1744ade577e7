//! CoinGecko HTTP client with bounded retry.
//!
//! Every logical request makes at most `max_attempts` HTTP calls. Rate limits
//! back off exponentially, timeouts back off a flat second, anything else
//! aborts immediately. Exhausting the budget is an error the caller maps to a
//! "try again later" reply, never a crash.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ApiConfig;

use super::MarketData;
use super::error::MarketError;
use super::models::{self, MarketEntry, PriceSnapshot, SearchHit, SearchResponse};

/// Rows scanned when ranking by short-term change.
const GAINERS_SCAN_DEPTH: usize = 50;
/// Rows the gainers view keeps after sorting.
const GAINERS_TAKE: usize = 5;
/// Search hits shown to the user.
const SEARCH_LIMIT: usize = 5;

pub struct MarketClient {
    client: Client,
    base_url: String,
    max_attempts: u32,
}

impl MarketClient {
    pub fn new(config: &ApiConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_attempts: config.max_attempts,
        }
    }

    /// GET an endpoint and decode the JSON body, retrying rate limits and
    /// timeouts up to the attempt budget.
    async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, MarketError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let mut exhausted = MarketError::RateLimited {
            attempts: self.max_attempts,
        };

        for attempt in 0..self.max_attempts {
            match self.client.get(&url).query(params).send().await {
                Ok(response) => match response.status() {
                    StatusCode::OK => {
                        debug!("{endpoint} responded on attempt {}", attempt + 1);
                        return Ok(response.json().await?);
                    }
                    StatusCode::TOO_MANY_REQUESTS => {
                        warn!("{endpoint} rate limited on attempt {}", attempt + 1);
                        exhausted = MarketError::RateLimited {
                            attempts: self.max_attempts,
                        };
                        if attempt + 1 < self.max_attempts {
                            tokio::time::sleep(Duration::from_secs(1 << attempt)).await;
                        }
                    }
                    status => {
                        warn!("{endpoint} failed with status {status}");
                        return Err(MarketError::Status(status.as_u16()));
                    }
                },
                Err(err) if err.is_timeout() => {
                    warn!("{endpoint} timed out on attempt {}", attempt + 1);
                    exhausted = MarketError::Timeout {
                        attempts: self.max_attempts,
                    };
                    if attempt + 1 < self.max_attempts {
                        tokio::time::sleep(Duration::from_secs(1)).await;
                    }
                }
                Err(err) => return Err(MarketError::Transport(err)),
            }
        }

        Err(exhausted)
    }
}

#[async_trait]
impl MarketData for MarketClient {
    /// Price snapshot for one identifier. `Ok(None)` when the provider does
    /// not know the identifier.
    async fn snapshot(&self, id: &str) -> Result<Option<PriceSnapshot>, MarketError> {
        let params = [
            ("ids", id),
            ("vs_currencies", "usd,try"),
            ("include_24hr_change", "true"),
            ("include_market_cap", "true"),
            ("include_24hr_vol", "true"),
        ];
        let mut quotes: HashMap<String, PriceSnapshot> =
            self.request("simple/price", &params).await?;
        Ok(quotes.remove(id))
    }

    /// Top `limit` assets by market capitalization, with 24-hour change.
    async fn ranked(&self, limit: usize) -> Result<Vec<MarketEntry>, MarketError> {
        let per_page = limit.to_string();
        let params = [
            ("vs_currency", "usd"),
            ("order", "market_cap_desc"),
            ("per_page", per_page.as_str()),
            ("page", "1"),
            ("price_change_percentage", "24h"),
        ];
        self.request("coins/markets", &params).await
    }

    /// Free-text search, truncated to the first hits.
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, MarketError> {
        let params = [("query", query)];
        let response: SearchResponse = self.request("search", &params).await?;

        let mut coins = response.coins;
        coins.truncate(SEARCH_LIMIT);
        Ok(coins)
    }

    /// Biggest 1-hour gainers: broad market-cap fetch, then sort-and-slice
    /// client side.
    async fn top_gainers(&self) -> Result<Vec<MarketEntry>, MarketError> {
        let per_page = GAINERS_SCAN_DEPTH.to_string();
        let params = [
            ("vs_currency", "usd"),
            ("order", "market_cap_desc"),
            ("per_page", per_page.as_str()),
            ("page", "1"),
            ("price_change_percentage", "1h"),
        ];
        let entries: Vec<MarketEntry> = self.request("coins/markets", &params).await?;
        Ok(models::top_gainers(entries, GAINERS_TAKE))
    }
}
