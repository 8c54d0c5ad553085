//! Environment-driven application configuration.

use std::collections::BTreeMap;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

pub const DEFAULT_INDEX_SYMBOL: &str = "^NSEI";
pub const DEFAULT_HISTORY_RANGE: &str = "6mo";
pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";
/// Related symbols shown next to an analysis, in `PEERS` syntax.
pub const DEFAULT_PEERS: &str = "RPOWER=NTPC.NS|ADANIPOWER.NS|POWERGRID.NS";
pub const DEFAULT_WATCHLIST: [&str; 5] = ["AAPL", "TSLA", "INFY.NS", "RELIANCE.NS", "HDFCBANK.NS"];

/// Deployment environment name (`APP_ENV`), `sandbox` when unset.
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    pub index_symbol: String,
    pub history_range: String,
    pub watchlist: Vec<String>,
    pub poll_interval_seconds: u64,
    pub yahoo_base_url: String,
    pub fetch_max_retries: usize,
    /// Base symbol (exchange suffix stripped) to related symbols.
    pub peers: BTreeMap<String, Vec<String>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            index_symbol: DEFAULT_INDEX_SYMBOL.to_string(),
            history_range: DEFAULT_HISTORY_RANGE.to_string(),
            watchlist: DEFAULT_WATCHLIST.iter().map(|s| s.to_string()).collect(),
            poll_interval_seconds: 10,
            yahoo_base_url: DEFAULT_YAHOO_BASE_URL.to_string(),
            fetch_max_retries: 3,
            peers: parse_peer_map(DEFAULT_PEERS),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment, falling back to
    /// defaults for unset or unparsable values.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let watchlist = lookup("WATCHLIST")
            .map(|raw| parse_symbol_list(&raw))
            .filter(|symbols| !symbols.is_empty())
            .unwrap_or(defaults.watchlist);

        Self {
            port: parse_or(&lookup, "PORT", defaults.port),
            index_symbol: non_empty(lookup("INDEX_SYMBOL")).unwrap_or(defaults.index_symbol),
            history_range: non_empty(lookup("HISTORY_RANGE")).unwrap_or(defaults.history_range),
            watchlist,
            poll_interval_seconds: parse_or(
                &lookup,
                "POLL_INTERVAL_SECONDS",
                defaults.poll_interval_seconds,
            ),
            yahoo_base_url: non_empty(lookup("YAHOO_BASE_URL")).unwrap_or(defaults.yahoo_base_url),
            fetch_max_retries: parse_or(&lookup, "FETCH_MAX_RETRIES", defaults.fetch_max_retries),
            peers: lookup("PEERS")
                .map(|raw| parse_peer_map(&raw))
                .unwrap_or(defaults.peers),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_seconds)
    }
}

/// Split a comma separated symbol list, trimming blanks.
pub fn parse_symbol_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse `BASE=PEER|PEER;BASE=PEER` into a peer map. Entries without `=`
/// or without any peer are skipped.
pub fn parse_peer_map(raw: &str) -> BTreeMap<String, Vec<String>> {
    let mut peers = BTreeMap::new();

    for entry in raw.split(';').map(str::trim).filter(|e| !e.is_empty()) {
        let Some((base, list)) = entry.split_once('=') else {
            warn!(entry, "Ignoring peer entry without '='");
            continue;
        };
        let base = base.trim();
        let symbols: Vec<String> = list
            .split('|')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if base.is_empty() || symbols.is_empty() {
            warn!(entry, "Ignoring empty peer entry");
            continue;
        }
        peers.insert(base.to_string(), symbols);
    }
    peers
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, default = %default, "Invalid value for {}, using default", key);
            default
        }),
        None => default,
    }
}
