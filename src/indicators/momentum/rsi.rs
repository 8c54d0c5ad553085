//! RSI (Relative Strength Index) indicator

use crate::common::math;

pub const RSI_PERIOD: usize = 14;

/// Calculate RSI for every position of `closes`.
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss over the trailing `period` close-to-close
/// changes. A zero average loss gives exactly 100. Positions with fewer than
/// `period` changes behind them are `None`.
pub fn rsi_series(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; closes.len()];
    if period == 0 || closes.len() <= period {
        return out;
    }

    let mut gains = Vec::with_capacity(closes.len() - 1);
    let mut losses = Vec::with_capacity(closes.len() - 1);
    for pair in closes.windows(2) {
        let change = pair[1] - pair[0];
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    let avg_gains = math::rolling_mean(&gains, period);
    let avg_losses = math::rolling_mean(&losses, period);

    // change j sits between closes j and j+1
    for (j, (avg_gain, avg_loss)) in avg_gains.iter().zip(avg_losses.iter()).enumerate() {
        if let (Some(avg_gain), Some(avg_loss)) = (avg_gain, avg_loss) {
            out[j + 1] = Some(rsi_from_averages(*avg_gain, *avg_loss));
        }
    }
    out
}

/// RSI from average gain and loss, with the zero-loss case pinned to 100.
pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }

    let rs = avg_gain / avg_loss;
    let rsi = 100.0 - (100.0 / (1.0 + rs));
    rsi.clamp(0.0, 100.0)
}
