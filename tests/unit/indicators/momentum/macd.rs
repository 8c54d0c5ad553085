//! Unit tests for MACD indicator

use tickerlens::indicators::momentum::{macd_series, macd_series_default};
use tickerlens::indicators::trend::ema_series;

use crate::support::zigzag_closes;

#[test]
fn test_macd_is_fast_minus_slow_ema() {
    let closes = zigzag_closes(60, 100.0, 0.4);
    let macd = macd_series_default(&closes);
    let fast = ema_series(&closes, 12);
    let slow = ema_series(&closes, 26);

    for i in 0..closes.len() {
        assert!((macd.macd[i].unwrap() - (fast[i] - slow[i])).abs() < 1e-12);
    }
}

#[test]
fn test_signal_line_recursion() {
    let closes = zigzag_closes(60, 100.0, 0.4);
    let macd = macd_series_default(&closes);
    let alpha = 2.0 / 10.0;

    assert_eq!(macd.signal[0], macd.macd[0]);
    for i in 1..closes.len() {
        let expected = alpha * macd.macd[i].unwrap() + (1.0 - alpha) * macd.signal[i - 1].unwrap();
        assert!((macd.signal[i].unwrap() - expected).abs() < 1e-12, "position {}", i);
    }
}

#[test]
fn test_macd_defined_on_single_bar() {
    let macd = macd_series(&[100.0], 12, 26, 9);
    assert_eq!(macd.macd, vec![Some(0.0)]);
    assert_eq!(macd.signal, vec![Some(0.0)]);
}

#[test]
fn test_macd_positive_in_uptrend() {
    let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
    let macd = macd_series_default(&closes);
    assert!(macd.macd[59].unwrap() > 0.0);
    assert!(macd.macd[59].unwrap() > macd.signal[59].unwrap());
}

#[test]
fn test_macd_columns_are_always_defined() {
    let closes = zigzag_closes(40, 50.0, -0.2);
    let macd = macd_series_default(&closes);
    assert_eq!(macd.macd.len(), closes.len());
    assert_eq!(macd.signal.len(), closes.len());
    assert!(macd.macd.iter().chain(macd.signal.iter()).all(Option::is_some));

    let empty = macd_series_default(&[]);
    assert!(empty.macd.is_empty() && empty.signal.is_empty());
}
