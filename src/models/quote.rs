use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Live price snapshot for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    pub previous_close: f64,
    pub change: f64,
    pub change_percent: f64,
    pub updated_at: DateTime<Utc>,
}

impl Quote {
    /// Derive change figures from the last price and the previous close.
    /// A zero previous close yields a zero percentage.
    pub fn new(
        symbol: impl Into<String>,
        price: f64,
        previous_close: f64,
        updated_at: DateTime<Utc>,
    ) -> Self {
        let change = price - previous_close;
        let change_percent = if previous_close != 0.0 {
            change / previous_close * 100.0
        } else {
            0.0
        };

        Self {
            symbol: symbol.into(),
            price,
            previous_close,
            change,
            change_percent,
            updated_at,
        }
    }

    pub fn is_up(&self) -> bool {
        self.change >= 0.0
    }
}

/// Latest quote for a related symbol, or why it could not be fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerQuote {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<Quote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PeerQuote {
    pub fn available(quote: Quote) -> Self {
        Self {
            symbol: quote.symbol.clone(),
            quote: Some(quote),
            error: None,
        }
    }

    pub fn unavailable(symbol: impl Into<String>, error: impl ToString) -> Self {
        Self {
            symbol: symbol.into(),
            quote: None,
            error: Some(error.to_string()),
        }
    }
}
