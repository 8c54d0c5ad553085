//! Next-session price estimate.

pub mod regression;

pub use regression::{forecast_next_close, Forecast, ForecastError, TrendLine};
