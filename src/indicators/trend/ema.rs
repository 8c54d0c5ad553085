//! EMA (Exponential Moving Average) indicator

use crate::common::math;

/// Exponential moving average with α = 2/(span+1), seeded with the first
/// close. Every position is defined.
pub fn ema_series(closes: &[f64], span: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(closes.len());
    let mut previous: Option<f64> = None;

    for &close in closes {
        let value = match previous {
            Some(prev) => math::ema_from_previous(close, prev, span),
            None => close,
        };
        out.push(value);
        previous = Some(value);
    }
    out
}
