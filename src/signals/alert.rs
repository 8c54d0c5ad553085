//! Price alert threshold check.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertStatus {
    pub alert_price: f64,
    pub last_close: f64,
    pub triggered: bool,
}

/// The alert fires once the last close reaches the alert price.
pub fn check_alert(last_close: f64, alert_price: f64) -> AlertStatus {
    AlertStatus {
        alert_price,
        last_close,
        triggered: last_close >= alert_price,
    }
}
