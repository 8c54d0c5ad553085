//! Unit tests for simple moving averages

use tickerlens::indicators::trend::{sma_series, MA_LONG_PERIOD, MA_SHORT_PERIOD};

use crate::support::zigzag_closes;

#[test]
fn test_sma_undefined_before_window_fills() {
    let closes = zigzag_closes(60, 100.0, 0.3);
    let ma20 = sma_series(&closes, MA_SHORT_PERIOD);
    let ma50 = sma_series(&closes, MA_LONG_PERIOD);

    assert!(ma20[..19].iter().all(Option::is_none));
    assert!(ma20[19..].iter().all(Option::is_some));
    assert!(ma50[..49].iter().all(Option::is_none));
    assert!(ma50[49..].iter().all(Option::is_some));
}

#[test]
fn test_sma_equals_trailing_mean() {
    let closes = zigzag_closes(60, 100.0, 0.3);
    let ma20 = sma_series(&closes, 20);

    for i in 19..closes.len() {
        let expected: f64 = closes[i - 19..=i].iter().sum::<f64>() / 20.0;
        assert!((ma20[i].unwrap() - expected).abs() < 1e-9, "position {}", i);
    }
}

#[test]
fn test_sma_on_short_series() {
    let closes = zigzag_closes(5, 100.0, 0.3);
    assert!(sma_series(&closes, 20).iter().all(Option::is_none));
}
