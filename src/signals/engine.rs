//! Main signal evaluation engine: indicators for both series, then the classifier.

use chrono::Utc;
use tracing::debug;

use crate::indicators::{IndicatorEngine, IndicatorError};
use crate::models::bars::MarketSnapshot;
use crate::models::indicators::IndicatorFrame;
use crate::models::signal::Evaluation;
use crate::signals::classifier::{classify, ClassifierInput};

pub struct SignalEngine;

impl SignalEngine {
    /// Evaluate the latest signal for the instrument in `snapshot`.
    ///
    /// Fails only when the instrument series is empty. An empty index series
    /// leaves the market trend undefined rather than failing.
    pub fn evaluate(snapshot: &MarketSnapshot) -> Result<Evaluation, IndicatorError> {
        Self::evaluate_with_frame(snapshot).map(|(evaluation, _)| evaluation)
    }

    /// Evaluate and also return the instrument's full indicator frame
    /// (for API responses and reports).
    pub fn evaluate_with_frame(
        snapshot: &MarketSnapshot,
    ) -> Result<(Evaluation, IndicatorFrame), IndicatorError> {
        let frame = IndicatorEngine::compute(&snapshot.instrument)?;
        let index_frame = match IndicatorEngine::compute(&snapshot.index) {
            Ok(frame) => Some(frame),
            Err(IndicatorError::InsufficientData { symbol }) => {
                debug!(index = %symbol, "SignalEngine: index series empty, trend undefined");
                None
            }
        };

        let latest = *frame
            .latest()
            .ok_or_else(|| IndicatorError::InsufficientData {
                symbol: frame.symbol.clone(),
            })?;
        let index_latest = index_frame.as_ref().and_then(|f| f.latest());

        let input = ClassifierInput::from_rows(&latest, index_latest);
        let (trend, signal) = classify(&input);

        debug!(
            symbol = %snapshot.instrument.symbol,
            trend = %trend,
            signal = %signal,
            "SignalEngine: {} -> {} ({})",
            snapshot.instrument.symbol,
            signal,
            trend
        );

        let evaluation = Evaluation {
            symbol: snapshot.instrument.symbol.clone(),
            index_symbol: snapshot.index.symbol.clone(),
            trend,
            signal,
            latest,
            index_close: input.index_close,
            index_ma50: input.index_ma50,
            evaluated_at: Utc::now(),
        };

        Ok((evaluation, frame))
    }
}
