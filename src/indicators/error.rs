use thiserror::Error;

/// Failures raised while deriving indicators from a price series.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    #[error("no price bars available for {symbol}")]
    InsufficientData { symbol: String },
}
