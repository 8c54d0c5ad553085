//! Builds the full indicator frame for a price series.

use tracing::debug;

use crate::indicators::error::IndicatorError;
use crate::indicators::momentum::{macd_series_default, rsi_series, RSI_PERIOD};
use crate::indicators::trend::{sma_series, MA_LONG_PERIOD, MA_SHORT_PERIOD};
use crate::models::bars::PriceSeries;
use crate::models::indicators::{IndicatorFrame, IndicatorRow};

pub struct IndicatorEngine;

impl IndicatorEngine {
    /// Compute MA20, MA50, RSI14 and MACD/signal for every bar of `series`.
    ///
    /// The frame has one row per bar, in the same order. Only an empty series
    /// is an error; short series yield `None` where history is missing.
    pub fn compute(series: &PriceSeries) -> Result<IndicatorFrame, IndicatorError> {
        if series.is_empty() {
            return Err(IndicatorError::InsufficientData {
                symbol: series.symbol.clone(),
            });
        }

        let closes = series.closes();
        let ma20 = sma_series(&closes, MA_SHORT_PERIOD);
        let ma50 = sma_series(&closes, MA_LONG_PERIOD);
        let rsi14 = rsi_series(&closes, RSI_PERIOD);
        let macd = macd_series_default(&closes);

        let rows = series
            .bars()
            .iter()
            .enumerate()
            .map(|(i, bar)| IndicatorRow {
                date: bar.date,
                open: bar.open,
                high: bar.high,
                low: bar.low,
                close: bar.close,
                volume: bar.volume,
                ma20: ma20[i],
                ma50: ma50[i],
                rsi14: rsi14[i],
                macd: macd.macd[i],
                macd_signal: macd.signal[i],
            })
            .collect::<Vec<_>>();

        debug!(
            symbol = %series.symbol,
            bars = rows.len(),
            "IndicatorEngine: computed frame for {} ({} bars)",
            series.symbol,
            rows.len()
        );

        Ok(IndicatorFrame::new(series.symbol.clone(), rows))
    }
}
