//! Unit tests for the trend-line forecast

use tickerlens::forecast::{forecast_next_close, ForecastError, TrendLine};
use tickerlens::models::bars::PriceSeries;

use crate::support::{linear_closes, series_from_closes};

#[test]
fn test_linear_series_predicts_next_point() {
    let series = series_from_closes("TCS.NS", &linear_closes(30, 100.0, 2.0));
    let forecast = forecast_next_close(&series).unwrap();

    assert!((forecast.predicted_close - 160.0).abs() < 1e-9);
    assert!((forecast.slope - 2.0).abs() < 1e-9);
    assert!((forecast.intercept - 100.0).abs() < 1e-9);
    assert!((forecast.r_squared - 1.0).abs() < 1e-9);
}

#[test]
fn test_flat_series_has_zero_slope() {
    let line = TrendLine::fit(&[5.0, 5.0, 5.0]).unwrap();
    assert_eq!(line.slope, 0.0);
    assert_eq!(line.predict(3.0), 5.0);
    assert_eq!(line.r_squared, 1.0);
}

#[test]
fn test_noisy_series_fit_quality_below_one() {
    let line = TrendLine::fit(&[1.0, 3.0, 2.0, 4.0]).unwrap();
    assert!((line.slope - 0.8).abs() < 1e-9);
    assert!(line.r_squared > 0.0 && line.r_squared < 1.0);
}

#[test]
fn test_single_point_is_rejected() {
    let series = series_from_closes("TCS.NS", &[100.0]);
    assert_eq!(
        forecast_next_close(&series),
        Err(ForecastError::NotEnoughPoints { needed: 2, got: 1 })
    );
    let empty = PriceSeries::new("TCS.NS", Vec::new());
    assert!(forecast_next_close(&empty).is_err());
}

#[test]
fn test_non_finite_input_is_rejected() {
    assert_eq!(
        TrendLine::fit(&[1.0, f64::NAN]),
        Err(ForecastError::DegenerateInput)
    );
}
