//! HTTP endpoint server using Axum

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

use crate::config::AppConfig;
use crate::core::analysis::{AnalysisError, AnalysisService};
use crate::metrics::Metrics;
use crate::services::yahoo::YahooFinanceProvider;

pub const SERVICE_NAME: &str = "tickerlens-analysis";

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub analysis: Arc<AnalysisService>,
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

/// JSON error body with a status derived from the failure kind.
pub struct ApiError(AnalysisError);

impl From<AnalysisError> for ApiError {
    fn from(error: AnalysisError) -> Self {
        Self(error)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            AnalysisError::MarketData(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            AnalysisError::MarketData(_) => StatusCode::BAD_GATEWAY,
            AnalysisError::Indicator(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.0, "Analysis request failed");
        } else {
            warn!(error = %self.0, "Analysis request rejected");
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": SERVICE_NAME
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

#[derive(Debug, Deserialize)]
struct AnalysisQuery {
    alert: Option<f64>,
}

/// Signal, trend, forecast and recent indicator rows for a symbol
async fn get_analysis(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(params): Query<AnalysisQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let report = state.analysis.analyze(&symbol, params.alert).await?;
    Ok(Json(report))
}

/// Latest price and change versus the previous close
async fn get_quote(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let quote = state.analysis.quote(&symbol).await?;
    Ok(Json(quote))
}

/// Market cap, day and 52-week ranges and last volume
async fn get_fundamentals(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let fundamentals = state.analysis.fundamentals(&symbol).await?;
    Ok(Json(fundamentals))
}

/// Quotes for the symbols configured as related to `symbol`
async fn get_peers(State(state): State<AppState>, Path(symbol): Path<String>) -> Json<Value> {
    let peers = state.analysis.peer_quotes(&symbol).await;
    Json(json!({ "symbol": symbol, "peers": peers }))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/analysis/{symbol}", get(get_analysis))
        .route("/api/quotes/{symbol}", get(get_quote))
        .route("/api/fundamentals/{symbol}", get(get_fundamentals))
        .route("/api/peers/{symbol}", get(get_peers))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);
    let provider = Arc::new(YahooFinanceProvider::new(&config.yahoo_base_url)?);
    let analysis = AnalysisService::new(
        provider,
        config.index_symbol.clone(),
        config.history_range.clone(),
    )
    .with_peers(config.peers.clone())
    .with_metrics(metrics.clone());

    let state = AppState {
        health: Arc::new(RwLock::new(HealthStatus::default())),
        metrics,
        start_time: Arc::new(Instant::now()),
        analysis: Arc::new(analysis),
    };
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    info!(port = config.port, "HTTP server listening on port {}", config.port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        config.port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
