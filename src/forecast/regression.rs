//! Ordinary least squares trend line over session index.
//!
//! Fits close = intercept + slope * day where day runs 0..n-1, then
//! extrapolates to day n. Educational estimate, not a trading input.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::bars::PriceSeries;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    #[error("need at least {needed} points to fit a trend line, got {got}")]
    NotEnoughPoints { needed: usize, got: usize },

    #[error("input contains non-finite values")]
    DegenerateInput,
}

/// Fitted line `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination. 1.0 when all points are equal.
    pub r_squared: f64,
}

impl TrendLine {
    /// Fit against x = 0, 1, ..., n-1.
    pub fn fit(values: &[f64]) -> Result<Self, ForecastError> {
        if values.len() < 2 {
            return Err(ForecastError::NotEnoughPoints {
                needed: 2,
                got: values.len(),
            });
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::DegenerateInput);
        }

        let n = values.len() as f64;
        let x_mean = (n - 1.0) / 2.0;
        let y_mean = values.iter().sum::<f64>() / n;

        let mut sxy = 0.0;
        let mut sxx = 0.0;
        for (i, y) in values.iter().enumerate() {
            let dx = i as f64 - x_mean;
            sxy += dx * (y - y_mean);
            sxx += dx * dx;
        }

        let slope = sxy / sxx;
        let intercept = y_mean - slope * x_mean;

        let ss_tot: f64 = values.iter().map(|y| (y - y_mean).powi(2)).sum();
        let ss_res: f64 = values
            .iter()
            .enumerate()
            .map(|(i, y)| (y - (intercept + slope * i as f64)).powi(2))
            .sum();
        let r_squared = if ss_tot == 0.0 {
            1.0
        } else {
            1.0 - ss_res / ss_tot
        };

        Ok(Self {
            slope,
            intercept,
            r_squared,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub predicted_close: f64,
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

/// Estimate the close of the session after the last bar of `series`.
pub fn forecast_next_close(series: &PriceSeries) -> Result<Forecast, ForecastError> {
    let closes = series.closes();
    let line = TrendLine::fit(&closes)?;

    Ok(Forecast {
        predicted_close: line.predict(closes.len() as f64),
        slope: line.slope,
        intercept: line.intercept,
        r_squared: line.r_squared,
    })
}
