//! tickerlens API Server
//!
//! HTTP API exposing per-symbol analysis, live quotes, health and metrics.
//! Stateless; every request fetches fresh market data.

use dotenvy::dotenv;
use tickerlens::config::{get_environment, AppConfig};
use tickerlens::core::http::start_server;
use tickerlens::logging;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();
    logging::init_logging();

    let config = AppConfig::from_env();
    info!("Starting tickerlens API Server");
    info!(environment = %get_environment(), "Environment");
    info!(
        port = config.port,
        index = %config.index_symbol,
        range = %config.history_range,
        "HTTP Server: http://0.0.0.0:{}",
        config.port
    );

    let server_config = config.clone();
    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(&server_config).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
