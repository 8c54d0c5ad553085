use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One session's OHLCV with the indicators derived up to it. `None` marks
/// positions without enough history for that indicator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRow {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub ma20: Option<f64>,
    pub ma50: Option<f64>,
    pub rsi14: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
}

impl IndicatorRow {
    /// MACD minus its signal line, when both are defined.
    pub fn macd_histogram(&self) -> Option<f64> {
        Some(self.macd? - self.macd_signal?)
    }
}

/// Indicator rows aligned index-for-index with a `PriceSeries`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorFrame {
    pub symbol: String,
    pub rows: Vec<IndicatorRow>,
}

impl IndicatorFrame {
    pub fn new(symbol: String, rows: Vec<IndicatorRow>) -> Self {
        Self { symbol, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn latest(&self) -> Option<&IndicatorRow> {
        self.rows.last()
    }

    /// The last `n` rows (fewer if the frame is shorter).
    pub fn tail(&self, n: usize) -> &[IndicatorRow] {
        let start = self.rows.len().saturating_sub(n);
        &self.rows[start..]
    }

    pub fn volume(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.volume).collect()
    }

    pub fn ma20(&self) -> Vec<Option<f64>> {
        self.rows.iter().map(|r| r.ma20).collect()
    }

    pub fn ma50(&self) -> Vec<Option<f64>> {
        self.rows.iter().map(|r| r.ma50).collect()
    }

    pub fn rsi14(&self) -> Vec<Option<f64>> {
        self.rows.iter().map(|r| r.rsi14).collect()
    }

    pub fn macd(&self) -> Vec<Option<f64>> {
        self.rows.iter().map(|r| r.macd).collect()
    }

    pub fn macd_signal(&self) -> Vec<Option<f64>> {
        self.rows.iter().map(|r| r.macd_signal).collect()
    }
}
