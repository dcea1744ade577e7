//! # Kripto Radar Bot
//!
//! Telegram bot answering cryptocurrency price queries from CoinGecko data.
//!
//! ## Architecture
//! The bot is organized into modules:
//! - `config`: environment variable configuration management
//! - `resolver`: user token → provider identifier aliasing
//! - `classifier`: free-text plausibility heuristics
//! - `market`: CoinGecko client with bounded retry, response models
//! - `format`: pure display formatting for prices, percentages and listings
//! - `bot`: command dispatch, in-flight guard and the Telegram transport
//!
//! ## Environment Setup
//! `TELEGRAM_BOT_TOKEN` is required; the process refuses to start without it.
//! `COINGECKO_API_URL`, `API_TIMEOUT_SECS` and `API_MAX_ATTEMPTS` override the
//! defaults when set.

mod bot;
mod classifier;
mod config;
mod format;
mod market;
mod resolver;
mod texts;

use teloxide::Bot;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize the tracing subscriber for structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact(),
        )
        .init();

    tracing::info!("🏁 Starting Kripto Radar Bot...");
    tracing::info!(
        "📦 Package: {} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    // Fails fast when TELEGRAM_BOT_TOKEN is missing
    let config = &*config::CONFIG;

    let bot = Bot::new(config.telegram_token.clone());
    let market = market::MarketClient::new(&config.api);

    tracing::info!("🚀 Long polling started");
    bot::telegram::run(bot, market).await;
}
