//! MACD (Moving Average Convergence Divergence) indicator

use crate::indicators::trend::ema_series;

pub const MACD_FAST_PERIOD: usize = 12;
pub const MACD_SLOW_PERIOD: usize = 26;
pub const MACD_SIGNAL_PERIOD: usize = 9;

/// MACD line and signal line for every position.
///
/// Both columns are always defined. They are stored as `Option` to line up
/// with the other indicator columns of an `IndicatorRow`.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
}

/// Calculate MACD indicator
///
/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal) of MACD, seeded at the first MACD value
pub fn macd_series(
    closes: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> MacdSeries {
    let fast = ema_series(closes, fast_period);
    let slow = ema_series(closes, slow_period);

    let macd: Vec<f64> = fast.iter().zip(slow.iter()).map(|(f, s)| f - s).collect();
    let signal = ema_series(&macd, signal_period);

    MacdSeries {
        macd: macd.into_iter().map(Some).collect(),
        signal: signal.into_iter().map(Some).collect(),
    }
}

/// Calculate MACD with default periods (12, 26, 9)
pub fn macd_series_default(closes: &[f64]) -> MacdSeries {
    macd_series(closes, MACD_FAST_PERIOD, MACD_SLOW_PERIOD, MACD_SIGNAL_PERIOD)
}
