//! Daily price bars and the per-instrument series built from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading session's OHLCV record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceBar {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Date-ordered bars for one symbol, one bar per session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Build a series, sorting by date. When a date repeats, the last bar
    /// supplied for it is kept.
    pub fn new(symbol: impl Into<String>, mut bars: Vec<PriceBar>) -> Self {
        // stable sort keeps supply order within a date
        bars.sort_by_key(|b| b.date);
        let mut normalized: Vec<PriceBar> = Vec::with_capacity(bars.len());
        for bar in bars {
            match normalized.last_mut() {
                Some(last) if last.date == bar.date => *last = bar,
                _ => normalized.push(bar),
            }
        }

        Self {
            symbol: symbol.into(),
            bars: normalized,
        }
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    pub fn latest(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    pub fn latest_close(&self) -> Option<f64> {
        self.bars.last().map(|b| b.close)
    }
}

/// Instrument and reference index series for one evaluation cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub instrument: PriceSeries,
    pub index: PriceSeries,
}

impl MarketSnapshot {
    pub fn new(instrument: PriceSeries, index: PriceSeries) -> Self {
        Self { instrument, index }
    }
}
