//! One-shot analysis report: `tickerlens <SYMBOL> [ALERT_PRICE]`

use std::env;
use std::sync::Arc;

use dotenvy::dotenv;
use tickerlens::common::math;
use tickerlens::config::AppConfig;
use tickerlens::core::analysis::{AnalysisReport, AnalysisService};
use tickerlens::logging;
use tickerlens::models::fundamentals::Fundamentals;
use tickerlens::models::quote::PeerQuote;
use tickerlens::services::yahoo::YahooFinanceProvider;

fn fmt_opt(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "n/a".to_string())
}

fn print_report(report: &AnalysisReport) {
    let evaluation = &report.evaluation;
    let latest = &evaluation.latest;

    println!("Symbol: {}", evaluation.symbol);
    println!("Signal: {}", evaluation.signal);
    println!("Last Price: {:.2}", latest.close);
    println!("RSI: {}", fmt_opt(latest.rsi14));
    match &report.index_error {
        Some(error) => println!(
            "Market Trend ({}): {} (index data error: {})",
            evaluation.index_symbol, evaluation.trend, error
        ),
        None => println!(
            "Market Trend ({}): {}",
            evaluation.index_symbol, evaluation.trend
        ),
    }
    println!(
        "MA20: {}  MA50: {}  MACD: {}  Signal line: {}",
        fmt_opt(latest.ma20),
        fmt_opt(latest.ma50),
        fmt_opt(latest.macd),
        fmt_opt(latest.macd_signal)
    );

    if let Some(forecast) = &report.forecast {
        println!(
            "Predicted next close: {:.2} (trend {:+.4}/day, r² {:.3})",
            forecast.predicted_close, forecast.slope, forecast.r_squared
        );
    }
    if let Some(alert) = &report.alert {
        if alert.triggered {
            println!("Alert triggered: price reached {:.2}", alert.alert_price);
        } else {
            println!("Alert pending at {:.2}", alert.alert_price);
        }
    }

    let volumes: Vec<f64> = report.recent.iter().map(|row| row.volume).collect();
    if let Some(average) = math::mean(&volumes).filter(|avg| *avg > 0.0) {
        println!(
            "Volume: {:.0} ({:.2}x the {}-session average of {:.0})",
            latest.volume,
            latest.volume / average,
            volumes.len(),
            average
        );
    }

    println!();
    println!(
        "{:<12} {:>10} {:>10} {:>10} {:>10} {:>12} {:>10} {:>10} {:>8} {:>9} {:>9}",
        "Date", "Open", "High", "Low", "Close", "Volume", "MA20", "MA50", "RSI", "MACD", "Signal"
    );
    for row in &report.recent {
        println!(
            "{:<12} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>12.0} {:>10} {:>10} {:>8} {:>9} {:>9}",
            row.date.to_string(),
            row.open,
            row.high,
            row.low,
            row.close,
            row.volume,
            fmt_opt(row.ma20),
            fmt_opt(row.ma50),
            fmt_opt(row.rsi14),
            fmt_opt(row.macd),
            fmt_opt(row.macd_signal)
        );
    }
}

fn print_fundamentals(fundamentals: &Fundamentals) {
    println!();
    println!("Fundamentals");
    println!("  Market Cap: {}", fmt_opt(fundamentals.market_cap));
    println!(
        "  Day High: {}  Day Low: {}",
        fmt_opt(fundamentals.day_high),
        fmt_opt(fundamentals.day_low)
    );
    println!(
        "  52W High: {}  52W Low: {}",
        fmt_opt(fundamentals.year_high),
        fmt_opt(fundamentals.year_low)
    );
    println!("  Volume: {}", fmt_opt(fundamentals.last_volume));
}

fn print_peers(peers: &[PeerQuote]) {
    if peers.is_empty() {
        return;
    }
    println!();
    println!("Similar Stocks");
    for peer in peers {
        match &peer.quote {
            Some(quote) => println!(
                "  {} -> {:.2} ({:+.2}%)",
                peer.symbol, quote.price, quote.change_percent
            ),
            None => println!("  {} -> data not available", peer.symbol),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let mut args = env::args().skip(1);
    let symbol = args
        .next()
        .ok_or("usage: tickerlens <SYMBOL> [ALERT_PRICE]")?;
    let alert_price = args
        .next()
        .map(|raw| raw.parse::<f64>())
        .transpose()
        .map_err(|e| format!("invalid alert price: {}", e))?;

    let config = AppConfig::from_env();
    let provider = Arc::new(YahooFinanceProvider::new(&config.yahoo_base_url)?);
    let service = AnalysisService::new(provider, config.index_symbol, config.history_range)
        .with_peers(config.peers);

    let report = service.analyze(&symbol, alert_price).await?;
    print_report(&report);

    match service.fundamentals(&symbol).await {
        Ok(fundamentals) => print_fundamentals(&fundamentals),
        Err(e) => println!("\nFundamentals: not available ({})", e),
    }
    print_peers(&service.peer_quotes(&symbol).await);

    Ok(())
}
