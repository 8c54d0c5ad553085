//! Wire types for the `/v8/finance/chart` endpoint.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::models::bars::PriceBar;
use crate::models::fundamentals::Fundamentals;

#[derive(Debug, Clone, Deserialize)]
pub struct ChartResponse {
    pub chart: ChartEnvelope,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartEnvelope {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ChartError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartResult {
    pub meta: ChartMeta,
    #[serde(default)]
    pub timestamp: Vec<i64>,
    #[serde(default)]
    pub indicators: ChartIndicators,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    pub symbol: String,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub regular_market_price: Option<f64>,
    #[serde(default)]
    pub regular_market_time: Option<i64>,
    #[serde(default)]
    pub previous_close: Option<f64>,
    #[serde(default)]
    pub chart_previous_close: Option<f64>,
    #[serde(default)]
    pub regular_market_day_high: Option<f64>,
    #[serde(default)]
    pub regular_market_day_low: Option<f64>,
    #[serde(default)]
    pub regular_market_volume: Option<f64>,
    #[serde(default)]
    pub fifty_two_week_high: Option<f64>,
    #[serde(default)]
    pub fifty_two_week_low: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    /// Exchange offset from UTC in seconds.
    #[serde(default)]
    pub gmtoffset: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartIndicators {
    #[serde(default)]
    pub quote: Vec<QuoteColumns>,
}

/// Column-oriented OHLCV values; entries are null for sessions without trades.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteColumns {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}

fn column(values: &[Option<f64>], i: usize) -> Option<f64> {
    values.get(i).copied().flatten().filter(|v| v.is_finite())
}

impl ChartResult {
    fn columns(&self) -> Option<&QuoteColumns> {
        self.indicators.quote.first()
    }

    /// Exchange-local calendar date for a unix timestamp.
    pub fn session_date(&self, timestamp: i64) -> Option<NaiveDate> {
        DateTime::from_timestamp(timestamp + self.meta.gmtoffset, 0).map(|dt| dt.date_naive())
    }

    /// Daily bars, skipping rows without a close. Missing open/high/low
    /// fall back to the close and missing volume to zero.
    pub fn to_bars(&self) -> Vec<PriceBar> {
        let Some(cols) = self.columns() else {
            return Vec::new();
        };

        self.timestamp
            .iter()
            .enumerate()
            .filter_map(|(i, &ts)| {
                let close = column(&cols.close, i)?;
                let date = self.session_date(ts)?;
                Some(PriceBar::new(
                    date,
                    column(&cols.open, i).unwrap_or(close),
                    column(&cols.high, i).unwrap_or(close),
                    column(&cols.low, i).unwrap_or(close),
                    close,
                    column(&cols.volume, i).unwrap_or(0.0),
                ))
            })
            .collect()
    }

    /// Non-null closes in time order.
    pub fn closes(&self) -> Vec<f64> {
        match self.columns() {
            Some(cols) => (0..cols.close.len())
                .filter_map(|i| column(&cols.close, i))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Last price and previous close, preferring the metadata block and
    /// falling back to the last two intraday closes.
    pub fn price_and_previous_close(&self) -> Option<(f64, f64)> {
        if let Some(price) = self.meta.regular_market_price {
            if let Some(prev) = self
                .meta
                .previous_close
                .or(self.meta.chart_previous_close)
                .filter(|p| *p != 0.0)
            {
                return Some((price, prev));
            }
        }

        let closes = self.closes();
        let price = *closes.last()?;
        let prev = if closes.len() > 1 {
            closes[closes.len() - 2]
        } else {
            price
        };
        Some((price, prev))
    }

    /// Headline figures from the metadata block.
    pub fn fundamentals(&self) -> Fundamentals {
        let meta = &self.meta;
        Fundamentals {
            symbol: meta.symbol.clone(),
            currency: meta.currency.clone(),
            market_cap: meta.market_cap,
            day_high: meta.regular_market_day_high,
            day_low: meta.regular_market_day_low,
            year_high: meta.fifty_two_week_high,
            year_low: meta.fifty_two_week_low,
            last_volume: meta.regular_market_volume,
        }
    }

    pub fn market_time(&self) -> Option<DateTime<Utc>> {
        self.meta
            .regular_market_time
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
    }
}
