//! Unit tests for the indicator engine

use tickerlens::indicators::{IndicatorEngine, IndicatorError};
use tickerlens::models::bars::{PriceBar, PriceSeries};

use crate::support::{day, series_from_closes, zigzag_closes};

#[test]
fn test_frame_matches_series_length_and_dates() {
    let series = series_from_closes("RELIANCE.NS", &zigzag_closes(125, 2500.0, 2.0));
    let frame = IndicatorEngine::compute(&series).unwrap();

    assert_eq!(frame.len(), series.len());
    assert_eq!(frame.symbol, "RELIANCE.NS");
    for (row, bar) in frame.rows.iter().zip(series.bars()) {
        assert_eq!(row.date, bar.date);
        assert_eq!(row.close, bar.close);
    }
}

#[test]
fn test_empty_series_is_insufficient_data() {
    let series = PriceSeries::new("TCS.NS", Vec::new());
    assert_eq!(
        IndicatorEngine::compute(&series),
        Err(IndicatorError::InsufficientData {
            symbol: "TCS.NS".to_string()
        })
    );
}

#[test]
fn test_short_series_marks_undefined_values() {
    let series = series_from_closes("ITC.NS", &zigzag_closes(5, 400.0, 1.0));
    let frame = IndicatorEngine::compute(&series).unwrap();

    assert_eq!(frame.len(), 5);
    assert!(frame.ma20().iter().all(Option::is_none));
    assert!(frame.ma50().iter().all(Option::is_none));
    assert!(frame.rsi14().iter().all(Option::is_none));
    assert!(frame.macd().iter().all(Option::is_some));
}

#[test]
fn test_no_look_ahead() {
    let closes = zigzag_closes(90, 100.0, 0.5);
    let full = IndicatorEngine::compute(&series_from_closes("SBIN.NS", &closes)).unwrap();

    for cut in [1, 14, 15, 20, 49, 50, 75] {
        let truncated =
            IndicatorEngine::compute(&series_from_closes("SBIN.NS", &closes[..cut])).unwrap();
        assert_eq!(truncated.rows[..], full.rows[..cut], "cut at {}", cut);
    }
}

#[test]
fn test_compute_is_idempotent() {
    let series = series_from_closes("INFY.NS", &zigzag_closes(80, 1500.0, -1.0));
    let first = IndicatorEngine::compute(&series).unwrap();
    let second = IndicatorEngine::compute(&series).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_rows_carry_session_ohlcv() {
    let bars = vec![
        PriceBar::new(day(0), 10.0, 12.0, 9.0, 11.0, 5_000.0),
        PriceBar::new(day(1), 11.0, 11.5, 10.0, 10.5, 7_500.0),
    ];
    let frame = IndicatorEngine::compute(&PriceSeries::new("TCS.NS", bars)).unwrap();

    let row = frame.rows[1];
    assert_eq!(
        (row.open, row.high, row.low, row.close, row.volume),
        (11.0, 11.5, 10.0, 10.5, 7_500.0)
    );
    assert_eq!(frame.volume(), vec![5_000.0, 7_500.0]);
}
