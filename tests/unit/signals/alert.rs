//! Unit tests for price alerts

use tickerlens::signals::alert::check_alert;

#[test]
fn test_alert_triggers_at_or_above_price() {
    assert!(check_alert(100.0, 100.0).triggered);
    assert!(check_alert(101.0, 100.0).triggered);
    assert!(!check_alert(99.99, 100.0).triggered);
}
