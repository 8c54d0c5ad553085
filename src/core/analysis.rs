//! End-to-end analysis of one symbol: fetch, evaluate, forecast, alert.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::forecast::{forecast_next_close, Forecast};
use crate::indicators::IndicatorError;
use crate::metrics::Metrics;
use crate::models::bars::{MarketSnapshot, PriceSeries};
use crate::models::fundamentals::Fundamentals;
use crate::models::indicators::IndicatorRow;
use crate::models::quote::{PeerQuote, Quote};
use crate::models::signal::Evaluation;
use crate::services::market_data::{MarketDataError, MarketDataProvider};
use crate::signals::alert::{check_alert, AlertStatus};
use crate::signals::engine::SignalEngine;

/// Rows of recent history included in a report.
pub const REPORT_TAIL_ROWS: usize = 15;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    MarketData(#[from] MarketDataError),

    #[error(transparent)]
    Indicator(#[from] IndicatorError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub evaluation: Evaluation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast: Option<Forecast>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<AlertStatus>,
    /// Why the index could not be fetched. The trend is then undefined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_error: Option<String>,
    pub recent: Vec<IndicatorRow>,
}

pub struct AnalysisService {
    provider: Arc<dyn MarketDataProvider>,
    index_symbol: String,
    history_range: String,
    peers: BTreeMap<String, Vec<String>>,
    metrics: Option<Arc<Metrics>>,
}

impl AnalysisService {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        index_symbol: impl Into<String>,
        history_range: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            index_symbol: index_symbol.into(),
            history_range: history_range.into(),
            peers: BTreeMap::new(),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn with_peers(mut self, peers: BTreeMap<String, Vec<String>>) -> Self {
        self.peers = peers;
        self
    }

    pub fn index_symbol(&self) -> &str {
        &self.index_symbol
    }

    /// Fetch instrument and index bars concurrently.
    ///
    /// A failed index fetch degrades to an empty index series, so the
    /// evaluation reports an undefined market trend. The index error is
    /// returned alongside the snapshot.
    pub async fn fetch_snapshot(
        &self,
        symbol: &str,
    ) -> Result<(MarketSnapshot, Option<MarketDataError>), AnalysisError> {
        let (instrument, index) = tokio::join!(
            self.provider.get_daily_bars(symbol, &self.history_range),
            self.provider
                .get_daily_bars(&self.index_symbol, &self.history_range),
        );

        let instrument = instrument.inspect_err(|_| self.record_market_data_error())?;
        let (index, index_error) = match index {
            Ok(index) => (index, None),
            Err(e) => {
                self.record_market_data_error();
                warn!(
                    index = %self.index_symbol,
                    error = %e,
                    "AnalysisService: index data unavailable, market trend will be undefined"
                );
                (PriceSeries::new(self.index_symbol.clone(), Vec::new()), Some(e))
            }
        };

        Ok((MarketSnapshot::new(instrument, index), index_error))
    }

    /// Run the full analysis for `symbol`, checking `alert_price` if given.
    pub async fn analyze(
        &self,
        symbol: &str,
        alert_price: Option<f64>,
    ) -> Result<AnalysisReport, AnalysisError> {
        let (snapshot, index_error) = self.fetch_snapshot(symbol).await?;
        let (evaluation, frame) = SignalEngine::evaluate_with_frame(&snapshot)?;

        let forecast = match forecast_next_close(&snapshot.instrument) {
            Ok(forecast) => Some(forecast),
            Err(e) => {
                debug!(symbol, error = %e, "AnalysisService: no forecast for {}", symbol);
                None
            }
        };
        let alert = alert_price.map(|price| check_alert(evaluation.latest.close, price));

        if let Some(metrics) = &self.metrics {
            metrics.record_evaluation(evaluation.signal);
        }

        info!(
            symbol,
            signal = %evaluation.signal,
            trend = %evaluation.trend,
            close = evaluation.latest.close,
            "AnalysisService: {} evaluated as {} (market {})",
            symbol,
            evaluation.signal,
            evaluation.trend
        );

        Ok(AnalysisReport {
            evaluation,
            forecast,
            alert,
            index_error: index_error.map(|e| e.to_string()),
            recent: frame.tail(REPORT_TAIL_ROWS).to_vec(),
        })
    }

    pub async fn quote(&self, symbol: &str) -> Result<Quote, AnalysisError> {
        self.provider
            .get_quote(symbol)
            .await
            .inspect_err(|_| self.record_market_data_error())
            .map_err(AnalysisError::from)
    }

    pub async fn fundamentals(&self, symbol: &str) -> Result<Fundamentals, AnalysisError> {
        self.provider
            .get_fundamentals(symbol)
            .await
            .inspect_err(|_| self.record_market_data_error())
            .map_err(AnalysisError::from)
    }

    /// Related symbols configured for `symbol`, looked up by the full symbol
    /// first and then without its exchange suffix (`RPOWER.NS` -> `RPOWER`).
    pub fn peers_of(&self, symbol: &str) -> &[String] {
        let base = symbol.split('.').next().unwrap_or(symbol);
        self.peers
            .get(symbol)
            .or_else(|| self.peers.get(base))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Quotes for the related symbols, fetched concurrently. A failed fetch
    /// is reported on its entry and does not fail the others.
    pub async fn peer_quotes(&self, symbol: &str) -> Vec<PeerQuote> {
        let fetches = self.peers_of(symbol).iter().map(|peer| async move {
            match self.provider.get_quote(peer).await {
                Ok(quote) => PeerQuote::available(quote),
                Err(e) => {
                    self.record_market_data_error();
                    debug!(peer = %peer, error = %e, "AnalysisService: no quote for peer {}", peer);
                    PeerQuote::unavailable(peer.clone(), e)
                }
            }
        });
        join_all(fetches).await
    }

    fn record_market_data_error(&self) {
        if let Some(metrics) = &self.metrics {
            metrics.market_data_errors_total.inc();
        }
    }
}
