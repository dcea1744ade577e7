//! Error taxonomy for market data fetches.

use thiserror::Error;

/// Errors from the market data client.
///
/// `RateLimited` and `Timeout` mean the attempt budget ran out on a retryable
/// condition; the rest aborted on first sight. An identifier the provider does
/// not know is not an error; the client returns `Ok(None)` for it.
#[derive(Error, Debug)]
pub enum MarketError {
    #[error("rate limited after {attempts} attempts")]
    RateLimited { attempts: u32 },

    #[error("timed out after {attempts} attempts")]
    Timeout { attempts: u32 },

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
