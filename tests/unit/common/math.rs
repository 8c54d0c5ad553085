//! Unit tests for shared series math

use tickerlens::common::math::{ema_alpha, ema_from_previous, mean, rolling_mean};

#[test]
fn test_mean_of_empty_slice_is_none() {
    assert_eq!(mean(&[]), None);
    assert_eq!(mean(&[2.0, 4.0]), Some(3.0));
}

#[test]
fn test_rolling_mean_marks_warmup_positions() {
    let values = [1.0, 2.0, 3.0, 4.0, 5.0];
    let out = rolling_mean(&values, 3);
    assert_eq!(out, vec![None, None, Some(2.0), Some(3.0), Some(4.0)]);
}

#[test]
fn test_rolling_mean_window_longer_than_series() {
    assert_eq!(rolling_mean(&[1.0, 2.0], 5), vec![None, None]);
    assert_eq!(rolling_mean(&[1.0, 2.0], 0), vec![None, None]);
}

#[test]
fn test_ema_alpha_for_signal_span() {
    assert!((ema_alpha(9) - 0.2).abs() < 1e-12);
    assert!((ema_from_previous(10.0, 5.0, 9) - 6.0).abs() < 1e-12);
}
