//! Unit tests for quote change figures

use chrono::Utc;
use tickerlens::models::quote::Quote;

#[test]
fn test_quote_change_and_percent() {
    let quote = Quote::new("AAPL", 105.0, 100.0, Utc::now());
    assert!((quote.change - 5.0).abs() < 1e-12);
    assert!((quote.change_percent - 5.0).abs() < 1e-12);
    assert!(quote.is_up());
}

#[test]
fn test_quote_with_zero_previous_close() {
    let quote = Quote::new("AAPL", 105.0, 0.0, Utc::now());
    assert_eq!(quote.change_percent, 0.0);
}

#[test]
fn test_quote_down_move() {
    let quote = Quote::new("TSLA", 95.0, 100.0, Utc::now());
    assert!(!quote.is_up());
    assert!((quote.change_percent + 5.0).abs() < 1e-12);
}
