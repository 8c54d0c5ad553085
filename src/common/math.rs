//! Series arithmetic used by the indicators.

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Mean of the trailing `window` values ending at each position.
///
/// Positions with fewer than `window` values available are `None`.
/// A zero window yields an all-`None` series.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }

    for (offset, slice) in values.windows(window).enumerate() {
        out[offset + window - 1] = mean(slice);
    }
    out
}

/// Smoothing factor for a span-based EMA.
pub fn ema_alpha(span: usize) -> f64 {
    2.0 / (span as f64 + 1.0)
}

/// One step of the EMA recursion.
pub fn ema_from_previous(value: f64, previous: f64, span: usize) -> f64 {
    let alpha = ema_alpha(span);
    alpha * value + (1.0 - alpha) * previous
}
