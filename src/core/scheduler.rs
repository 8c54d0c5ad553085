//! Cron-based poller that fetches live quotes for a watchlist

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use cron::Schedule;
use futures_util::future::join_all;
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, error, info, warn};

use crate::metrics::Metrics;
use crate::models::quote::Quote;
use crate::services::market_data::{MarketDataError, MarketDataProvider};

/// Outcome of fetching one symbol during a poll cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum PollEvent {
    Quote(Quote),
    Failed { symbol: String, error: String },
}

impl PollEvent {
    pub fn symbol(&self) -> &str {
        match self {
            PollEvent::Quote(quote) => &quote.symbol,
            PollEvent::Failed { symbol, .. } => symbol,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error("poll interval must be greater than zero")]
    Disabled,

    #[error("poll interval of {seconds}s does not divide a minute, an hour or a day evenly")]
    UnevenInterval { seconds: u64 },

    #[error("invalid cron expression '{expression}': {source}")]
    InvalidSchedule {
        expression: String,
        #[source]
        source: cron::error::Error,
    },
}

/// Six-field cron expression that ticks exactly every `interval_seconds`.
///
/// Step fields restart at each minute, hour or day boundary, so only
/// intervals that divide the enclosing unit are representable. Anything
/// else returns `None`.
pub fn cron_expression(interval_seconds: u64) -> Option<String> {
    let divides = |unit: u64, step: u64| step > 0 && step < unit && unit % step == 0;

    match interval_seconds {
        s if divides(60, s) => Some(format!("*/{} * * * * *", s)),
        60 => Some("0 * * * * *".to_string()),
        s if s % 60 == 0 && divides(60, s / 60) => Some(format!("0 */{} * * * *", s / 60)),
        3_600 => Some("0 0 * * * *".to_string()),
        s if s % 3_600 == 0 && divides(24, s / 3_600) => {
            Some(format!("0 0 */{} * * *", s / 3_600))
        }
        86_400 => Some("0 0 0 * * *".to_string()),
        _ => None,
    }
}

/// Periodically fetches quotes for each symbol and forwards the results on
/// a channel. Failed fetches are retried with exponential backoff and then
/// reported as `PollEvent::Failed`.
pub struct QuotePoller {
    provider: Arc<dyn MarketDataProvider>,
    symbols: Vec<String>,
    schedule: Schedule,
    max_retries: usize,
    retry_delay: Duration,
    metrics: Option<Arc<Metrics>>,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl QuotePoller {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        symbols: Vec<String>,
        interval_seconds: u64,
    ) -> Result<Self, SchedulerError> {
        if interval_seconds == 0 {
            return Err(SchedulerError::Disabled);
        }

        let expression =
            cron_expression(interval_seconds).ok_or(SchedulerError::UnevenInterval {
                seconds: interval_seconds,
            })?;
        let schedule = Schedule::from_str(&expression).map_err(|source| {
            SchedulerError::InvalidSchedule {
                expression: expression.clone(),
                source,
            }
        })?;

        info!(
            interval = interval_seconds,
            cron = %expression,
            symbols = ?symbols,
            "QuotePoller: created with interval {}s (cron: {})",
            interval_seconds,
            expression
        );

        Ok(Self {
            provider,
            symbols,
            schedule,
            max_retries: 3,
            retry_delay: Duration::from_millis(500),
            metrics: None,
            handle: Arc::new(RwLock::new(None)),
        })
    }

    /// Retry budget per symbol fetch and the first backoff delay.
    pub fn with_retry(mut self, max_retries: usize, retry_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_delay = retry_delay;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.retry_delay)
            .with_max_delay(self.retry_delay * 8)
            .with_max_times(self.max_retries)
    }

    /// Fetch every symbol once, concurrently.
    pub async fn poll_once(&self) -> Vec<PollEvent> {
        let fetches = self.symbols.iter().map(|symbol| self.fetch(symbol));
        join_all(fetches).await
    }

    async fn fetch(&self, symbol: &str) -> PollEvent {
        let provider = &self.provider;
        let result = (|| async move { provider.get_quote(symbol).await })
            .retry(self.backoff())
            .sleep(tokio::time::sleep)
            .when(MarketDataError::is_transient)
            .notify(|e: &MarketDataError, delay: Duration| {
                warn!(
                    symbol,
                    error = %e,
                    delay_ms = delay.as_millis() as u64,
                    "QuotePoller: fetch for {} failed, retrying in {:?}",
                    symbol,
                    delay
                );
            })
            .await;

        match result {
            Ok(quote) => {
                debug!(symbol, price = quote.price, "QuotePoller: quote for {}", symbol);
                PollEvent::Quote(quote)
            }
            Err(e) => {
                error!(symbol, error = %e, "QuotePoller: giving up on {} this cycle", symbol);
                if let Some(metrics) = &self.metrics {
                    metrics.market_data_errors_total.inc();
                }
                PollEvent::Failed {
                    symbol: symbol.to_string(),
                    error: e.to_string(),
                }
            }
        }
    }

    /// Start polling in the background: one cycle immediately, then one per
    /// cron tick. The task ends when `stop` is called or `events` closes.
    pub async fn start(self: &Arc<Self>, events: mpsc::Sender<PollEvent>) {
        let poller = Arc::clone(self);

        let handle = tokio::spawn(async move {
            info!("QuotePoller: started");

            loop {
                for event in poller.poll_once().await {
                    if events.send(event).await.is_err() {
                        info!("QuotePoller: event receiver closed, stopping");
                        return;
                    }
                }

                let next_tick = poller.schedule.upcoming(chrono::Utc).next();
                match next_tick {
                    Some(next_tick) => {
                        let wait = (next_tick - chrono::Utc::now())
                            .to_std()
                            .unwrap_or_default();
                        tokio::time::sleep(wait).await;
                    }
                    None => {
                        tokio::time::sleep(Duration::from_secs(60)).await;
                    }
                }
            }
        });

        let mut slot = self.handle.write().await;
        if let Some(previous) = slot.replace(handle) {
            previous.abort();
        }
    }

    /// Cancel the background task, if running.
    pub async fn stop(&self) {
        let mut handle = self.handle.write().await;
        if let Some(h) = handle.take() {
            h.abort();
            info!("QuotePoller: stopped");
        }
    }

    pub async fn is_running(&self) -> bool {
        let handle = self.handle.read().await;
        handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}
