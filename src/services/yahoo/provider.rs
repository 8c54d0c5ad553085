//! Yahoo Finance market data provider implementation

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::messages::{ChartResponse, ChartResult};
use crate::models::bars::PriceSeries;
use crate::models::fundamentals::Fundamentals;
use crate::models::quote::Quote;
use crate::services::market_data::{MarketDataError, MarketDataProvider};

const USER_AGENT: &str = "Mozilla/5.0 (compatible; tickerlens/0.1)";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct YahooFinanceProvider {
    client: Client,
    base_url: Url,
}

impl YahooFinanceProvider {
    pub fn new(base_url: &str) -> Result<Self, MarketDataError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Self::with_client(base_url, client)
    }

    pub fn with_client(base_url: &str, client: Client) -> Result<Self, MarketDataError> {
        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
        })
    }

    fn chart_url(&self, symbol: &str, range: &str, interval: &str) -> Result<Url, MarketDataError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(&["v8", "finance", "chart", symbol]);
        url.query_pairs_mut()
            .append_pair("range", range)
            .append_pair("interval", interval)
            .append_pair("includePrePost", "false");
        Ok(url)
    }

    async fn fetch_chart(
        &self,
        symbol: &str,
        range: &str,
        interval: &str,
    ) -> Result<ChartResult, MarketDataError> {
        let url = self.chart_url(symbol, range, interval)?;
        debug!(symbol, range, interval, "Yahoo: requesting {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        // error payloads arrive with non-2xx statuses too, so decode first
        let parsed = match serde_json::from_str::<ChartResponse>(&body) {
            Ok(parsed) => parsed,
            Err(e) if status.is_success() => return Err(MarketDataError::Decode(e)),
            Err(_) => {
                return Err(MarketDataError::Status {
                    symbol: symbol.to_string(),
                    status: status.as_u16(),
                })
            }
        };

        if let Some(error) = parsed.chart.error {
            return Err(MarketDataError::Api {
                symbol: symbol.to_string(),
                code: error.code,
                message: error.description,
            });
        }
        if !status.is_success() {
            return Err(MarketDataError::Status {
                symbol: symbol.to_string(),
                status: status.as_u16(),
            });
        }

        parsed
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| MarketDataError::Empty {
                symbol: symbol.to_string(),
            })
    }
}

#[async_trait]
impl MarketDataProvider for YahooFinanceProvider {
    async fn get_daily_bars(
        &self,
        symbol: &str,
        range: &str,
    ) -> Result<PriceSeries, MarketDataError> {
        let chart = self.fetch_chart(symbol, range, "1d").await?;
        let series = PriceSeries::new(symbol, chart.to_bars());

        if series.is_empty() {
            return Err(MarketDataError::Empty {
                symbol: symbol.to_string(),
            });
        }

        debug!(
            symbol,
            bars = series.len(),
            "Yahoo: fetched {} daily bars for {}",
            series.len(),
            symbol
        );
        Ok(series)
    }

    async fn get_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        let chart = self.fetch_chart(symbol, "1d", "1m").await?;
        let (price, previous_close) =
            chart
                .price_and_previous_close()
                .ok_or_else(|| MarketDataError::Empty {
                    symbol: symbol.to_string(),
                })?;
        let updated_at = chart.market_time().unwrap_or_else(Utc::now);

        Ok(Quote::new(symbol, price, previous_close, updated_at))
    }

    async fn get_fundamentals(&self, symbol: &str) -> Result<Fundamentals, MarketDataError> {
        let chart = self.fetch_chart(symbol, "1d", "1m").await?;
        let mut fundamentals = chart.fundamentals();
        // report the symbol as requested, not Yahoo's canonical spelling
        fundamentals.symbol = symbol.to_string();
        Ok(fundamentals)
    }
}
