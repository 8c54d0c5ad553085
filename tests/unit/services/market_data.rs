//! Unit tests for market data error classification

use tickerlens::services::market_data::MarketDataError;

fn api_error(code: &str) -> MarketDataError {
    MarketDataError::Api {
        symbol: "RELIANCE.NS".to_string(),
        code: code.to_string(),
        message: "upstream said no".to_string(),
    }
}

#[test]
fn test_only_not_found_code_means_unknown_symbol() {
    assert!(api_error("Not Found").is_not_found());
    assert!(!api_error("Bad Request").is_not_found());
    assert!(!api_error("Unprocessable Entity").is_not_found());
}

#[test]
fn test_empty_result_means_unknown_symbol() {
    let err = MarketDataError::Empty {
        symbol: "RELIANCE.NS".to_string(),
    };
    assert!(err.is_not_found());
    assert!(!err.is_transient());
}

#[test]
fn test_status_errors_are_not_lookups() {
    let err = MarketDataError::Status {
        symbol: "RELIANCE.NS".to_string(),
        status: 404,
    };
    assert!(!err.is_not_found());
    assert!(!err.is_transient());
}

#[test]
fn test_api_error_message_includes_code() {
    let text = api_error("Bad Request").to_string();
    assert!(text.contains("Bad Request"));
    assert!(text.contains("upstream said no"));
}
