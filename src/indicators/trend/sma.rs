//! SMA (Simple Moving Average) indicator

use crate::common::math;

pub const MA_SHORT_PERIOD: usize = 20;
pub const MA_LONG_PERIOD: usize = 50;

/// Simple moving average of `closes` over the trailing `period` bars,
/// inclusive of the current bar.
///
/// The first `period - 1` positions are `None`.
pub fn sma_series(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    math::rolling_mean(closes, period)
}
