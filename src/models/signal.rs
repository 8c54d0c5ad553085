use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::indicators::IndicatorRow;

/// Discrete trading signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::Hold => "HOLD",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Broad market direction taken from the reference index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketTrend {
    Bullish,
    Bearish,
    InsufficientData,
}

impl MarketTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketTrend::Bullish => "BULLISH",
            MarketTrend::Bearish => "BEARISH",
            MarketTrend::InsufficientData => "INSUFFICIENT_DATA",
        }
    }
}

impl fmt::Display for MarketTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one evaluation cycle together with the values it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub symbol: String,
    pub index_symbol: String,
    pub trend: MarketTrend,
    pub signal: Signal,
    pub latest: IndicatorRow,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_close: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_ma50: Option<f64>,
    pub evaluated_at: DateTime<Utc>,
}
