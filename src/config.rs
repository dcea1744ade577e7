//! Configuration module for environment variables and application settings

use std::env;
use anyhow::{Result, anyhow};
use once_cell::sync::Lazy;

/// Global application configuration loaded from environment variables
pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram bot token, the only required secret
    pub telegram_token: String,

    /// Market data API configuration
    pub api: ApiConfig,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// CoinGecko API base URL
    pub base_url: String,
    /// Per-attempt request timeout in seconds
    pub timeout_secs: u64,
    /// Attempt budget for retryable failures
    pub max_attempts: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            telegram_token: env::var("TELEGRAM_BOT_TOKEN")
                .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN environment variable is required"))?,

            api: ApiConfig {
                base_url: env::var("COINGECKO_API_URL")
                    .unwrap_or_else(|_| "https://api.coingecko.com/api/v3".to_string()),
                timeout_secs: env::var("API_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .unwrap_or(10),
                max_attempts: env::var("API_MAX_ATTEMPTS")
                    .unwrap_or_else(|_| "3".to_string())
                    .parse()
                    .unwrap_or(3),
            },
        })
    }
}
