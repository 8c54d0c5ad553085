//! Market data provider interface.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::bars::PriceSeries;
use crate::models::fundamentals::Fundamentals;
use crate::models::quote::Quote;

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("market data request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("market data for {symbol} returned HTTP {status}")]
    Status { symbol: String, status: u16 },

    #[error("market data error for {symbol}: {code}: {message}")]
    Api {
        symbol: String,
        code: String,
        message: String,
    },

    #[error("failed to decode market data: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no market data returned for {symbol}")]
    Empty { symbol: String },

    #[error("invalid market data endpoint: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl MarketDataError {
    /// Whether retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            MarketDataError::Http(e) => !e.is_builder() && !e.is_decode(),
            MarketDataError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Whether the provider reported that the symbol does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            MarketDataError::Api { code, .. } => code.eq_ignore_ascii_case("Not Found"),
            MarketDataError::Empty { .. } => true,
            _ => false,
        }
    }
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Daily bars for `symbol` covering the trailing `range` (e.g. `6mo`).
    async fn get_daily_bars(&self, symbol: &str, range: &str)
        -> Result<PriceSeries, MarketDataError>;

    /// Latest price and change versus the previous close.
    async fn get_quote(&self, symbol: &str) -> Result<Quote, MarketDataError>;

    /// Market cap, day and 52-week ranges and last volume.
    async fn get_fundamentals(&self, symbol: &str) -> Result<Fundamentals, MarketDataError>;
}
