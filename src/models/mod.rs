//! Shared data models spanning the engine layers.

pub mod bars;
pub mod fundamentals;
pub mod indicators;
pub mod quote;
pub mod signal;

pub use bars::{MarketSnapshot, PriceBar, PriceSeries};
pub use fundamentals::Fundamentals;
pub use indicators::{IndicatorFrame, IndicatorRow};
pub use quote::{PeerQuote, Quote};
pub use signal::{Evaluation, MarketTrend, Signal};
