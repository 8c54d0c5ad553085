//! tickerlens live ticker
//!
//! Polls quotes for the configured watchlist and prints the board after
//! every update. Fetch failures are shown on the affected card.

use std::sync::Arc;

use dotenvy::dotenv;
use tickerlens::config::{get_environment, AppConfig};
use tickerlens::core::scheduler::QuotePoller;
use tickerlens::display::{PriceMove, TickerBoard};
use tickerlens::logging;
use tickerlens::metrics::Metrics;
use tickerlens::services::yahoo::YahooFinanceProvider;
use tokio::signal;
use tokio::sync::mpsc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = AppConfig::from_env();
    info!(environment = %get_environment(), "Starting tickerlens ticker");

    let provider = Arc::new(YahooFinanceProvider::new(&config.yahoo_base_url)?);
    let metrics = Arc::new(Metrics::new()?);
    let poller = Arc::new(
        QuotePoller::new(
            provider,
            config.watchlist.clone(),
            config.poll_interval_seconds,
        )?
        .with_retry(config.fetch_max_retries, std::time::Duration::from_millis(500))
        .with_metrics(metrics.clone()),
    );

    // the board is owned here and only this loop mutates it
    let mut board = TickerBoard::new(&config.watchlist);
    let (tx, mut rx) = mpsc::channel(config.watchlist.len().max(1) * 2);
    poller.start(tx).await;

    println!("{}", board.render());

    loop {
        tokio::select! {
            _ = signal::ctrl_c() => {
                info!("Shutting down ticker...");
                break;
            }
            event = rx.recv() => {
                let Some(event) = event else { break };
                let movement = board.apply_event(&event);
                if let Some(card) = board.card(event.symbol()) {
                    let marker = match movement {
                        Some(PriceMove::Up) => "▲",
                        Some(PriceMove::Down) => "▼",
                        Some(PriceMove::New) => "•",
                        Some(PriceMove::Unchanged) | None => " ",
                    };
                    println!("{} {}", marker, card.render());
                }
            }
        }
    }

    poller.stop().await;
    info!(
        failed_fetches = metrics.market_data_errors_total.get(),
        "Ticker stopped after {} failed fetches",
        metrics.market_data_errors_total.get()
    );
    Ok(())
}
