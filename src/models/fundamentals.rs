use serde::{Deserialize, Serialize};

/// Headline figures for one symbol. Any of them may be missing upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fundamentals {
    pub symbol: String,
    pub currency: Option<String>,
    pub market_cap: Option<f64>,
    pub day_high: Option<f64>,
    pub day_low: Option<f64>,
    pub year_high: Option<f64>,
    pub year_low: Option<f64>,
    pub last_volume: Option<f64>,
}

impl Fundamentals {
    /// Where `price` sits within the 52-week range, from 0 (at
    /// the yearly low) to 1 (at the yearly high).
    pub fn year_range_position(&self, price: f64) -> Option<f64> {
        let (low, high) = (self.year_low?, self.year_high?);
        if high <= low {
            return None;
        }
        Some(((price - low) / (high - low)).clamp(0.0, 1.0))
    }
}
