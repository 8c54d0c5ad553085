//! Shared builders for unit tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use tickerlens::models::bars::{PriceBar, PriceSeries};
use tickerlens::models::fundamentals::Fundamentals;
use tickerlens::models::quote::Quote;
use tickerlens::services::market_data::{MarketDataError, MarketDataProvider};

pub fn day(offset: usize) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(offset as i64)
}

pub fn series_from_closes(symbol: &str, closes: &[f64]) -> PriceSeries {
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PriceBar::new(day(i), close, close + 1.0, close - 1.0, close, 1_000.0))
        .collect();
    PriceSeries::new(symbol, bars)
}

pub fn linear_closes(count: usize, start: f64, step: f64) -> Vec<f64> {
    (0..count).map(|i| start + step * i as f64).collect()
}

/// Deterministic zig-zag around a drifting level.
pub fn zigzag_closes(count: usize, start: f64, drift: f64) -> Vec<f64> {
    (0..count)
        .map(|i| {
            let wiggle = if i % 2 == 0 { 1.5 } else { -1.0 };
            start + drift * i as f64 + wiggle
        })
        .collect()
}

/// In-memory provider. Quote failures are consumed one per call before
/// the stored quote is returned.
#[derive(Default)]
pub struct StubProvider {
    pub series: HashMap<String, PriceSeries>,
    pub quotes: HashMap<String, f64>,
    pub fundamentals: HashMap<String, Fundamentals>,
    pub quote_failures: Mutex<HashMap<String, Vec<MarketDataError>>>,
    pub quote_calls: AtomicUsize,
}

impl StubProvider {
    pub fn with_series(mut self, series: PriceSeries) -> Self {
        self.series.insert(series.symbol.clone(), series);
        self
    }

    pub fn with_quote(mut self, symbol: &str, price: f64) -> Self {
        self.quotes.insert(symbol.to_string(), price);
        self
    }

    pub fn with_fundamentals(mut self, fundamentals: Fundamentals) -> Self {
        self.fundamentals
            .insert(fundamentals.symbol.clone(), fundamentals);
        self
    }

    pub fn with_quote_failure(self, symbol: &str, error: MarketDataError) -> Self {
        self.quote_failures
            .lock()
            .unwrap()
            .entry(symbol.to_string())
            .or_default()
            .push(error);
        self
    }

    pub fn quote_calls(&self) -> usize {
        self.quote_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketDataProvider for StubProvider {
    async fn get_daily_bars(
        &self,
        symbol: &str,
        _range: &str,
    ) -> Result<PriceSeries, MarketDataError> {
        self.series
            .get(symbol)
            .cloned()
            .ok_or_else(|| MarketDataError::Empty {
                symbol: symbol.to_string(),
            })
    }

    async fn get_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        self.quote_calls.fetch_add(1, Ordering::SeqCst);

        let failure = {
            let mut failures = self.quote_failures.lock().unwrap();
            failures.get_mut(symbol).and_then(|queue| {
                if queue.is_empty() {
                    None
                } else {
                    Some(queue.remove(0))
                }
            })
        };
        if let Some(error) = failure {
            return Err(error);
        }

        let price = self
            .quotes
            .get(symbol)
            .copied()
            .ok_or_else(|| MarketDataError::Empty {
                symbol: symbol.to_string(),
            })?;
        Ok(Quote::new(symbol, price, price - 1.0, Utc::now()))
    }

    async fn get_fundamentals(&self, symbol: &str) -> Result<Fundamentals, MarketDataError> {
        self.fundamentals
            .get(symbol)
            .cloned()
            .ok_or_else(|| MarketDataError::Empty {
                symbol: symbol.to_string(),
            })
    }
}
