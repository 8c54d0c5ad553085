//! BUY/SELL/HOLD decision over the latest indicator rows.

use serde::{Deserialize, Serialize};

use crate::models::indicators::IndicatorRow;
use crate::models::signal::{MarketTrend, Signal};

pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;

/// Latest values the classifier decides on. Any field may be undefined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassifierInput {
    pub close: Option<f64>,
    pub ma20: Option<f64>,
    pub rsi14: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub index_close: Option<f64>,
    pub index_ma50: Option<f64>,
}

impl ClassifierInput {
    /// Take the instrument fields from `instrument` and the index fields
    /// from `index`, if one is available.
    pub fn from_rows(instrument: &IndicatorRow, index: Option<&IndicatorRow>) -> Self {
        Self {
            close: Some(instrument.close),
            ma20: instrument.ma20,
            rsi14: instrument.rsi14,
            macd: instrument.macd,
            macd_signal: instrument.macd_signal,
            index_close: index.map(|r| r.close),
            index_ma50: index.and_then(|r| r.ma50),
        }
    }
}

/// `a > b`, false when either side is undefined or NaN.
fn gt(a: Option<f64>, b: Option<f64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a > b)
}

/// `a < b`, false when either side is undefined or NaN.
fn lt(a: Option<f64>, b: Option<f64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a < b)
}

/// Market trend from the reference index close and its MA50.
pub fn market_trend(index_close: Option<f64>, index_ma50: Option<f64>) -> MarketTrend {
    match (index_close, index_ma50) {
        (Some(close), Some(ma50)) if close.is_finite() && ma50.is_finite() => {
            if close > ma50 {
                MarketTrend::Bullish
            } else {
                MarketTrend::Bearish
            }
        }
        _ => MarketTrend::InsufficientData,
    }
}

/// Classify the latest rows. First matching rule wins:
///
/// 1. BUY when close > MA20, RSI14 < 70, MACD > signal and the market is bullish
/// 2. SELL when close < MA20 and RSI14 > 30
/// 3. HOLD otherwise
pub fn classify(input: &ClassifierInput) -> (MarketTrend, Signal) {
    let trend = market_trend(input.index_close, input.index_ma50);

    let signal = if gt(input.close, input.ma20)
        && lt(input.rsi14, Some(RSI_OVERBOUGHT))
        && gt(input.macd, input.macd_signal)
        && trend == MarketTrend::Bullish
    {
        Signal::Buy
    } else if lt(input.close, input.ma20) && gt(input.rsi14, Some(RSI_OVERSOLD)) {
        Signal::Sell
    } else {
        Signal::Hold
    };

    (trend, signal)
}
