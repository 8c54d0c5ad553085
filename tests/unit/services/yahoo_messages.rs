//! Unit tests for Yahoo chart payload decoding

use chrono::NaiveDate;
use serde_json::json;
use tickerlens::services::yahoo::messages::ChartResponse;

fn daily_payload() -> serde_json::Value {
    json!({
        "chart": {
            "result": [{
                "meta": {
                    "symbol": "RELIANCE.NS",
                    "currency": "INR",
                    "regularMarketPrice": 2950.0,
                    "chartPreviousClose": 2900.0,
                    "gmtoffset": 19800
                },
                "timestamp": [1704080700, 1704167100, 1704253500],
                "indicators": {
                    "quote": [{
                        "open":   [2580.0, null, 2600.0],
                        "high":   [2600.0, null, 2620.0],
                        "low":    [2570.0, null, 2590.0],
                        "close":  [2590.0, null, 2610.0],
                        "volume": [1000000, null, null]
                    }]
                }
            }],
            "error": null
        }
    })
}

#[test]
fn test_bars_skip_rows_without_close() {
    let response: ChartResponse = serde_json::from_value(daily_payload()).unwrap();
    let result = &response.chart.result.as_ref().unwrap()[0];
    let bars = result.to_bars();

    assert_eq!(bars.len(), 2);
    assert_eq!(bars[0].close, 2590.0);
    assert_eq!(bars[0].volume, 1_000_000.0);
    assert_eq!(bars[1].close, 2610.0);
    assert_eq!(bars[1].volume, 0.0);
}

#[test]
fn test_session_dates_use_exchange_offset() {
    let response: ChartResponse = serde_json::from_value(daily_payload()).unwrap();
    let result = &response.chart.result.as_ref().unwrap()[0];
    let bars = result.to_bars();

    // 2024-01-01 03:45 UTC is 09:15 IST
    assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    assert_eq!(bars[1].date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
}

#[test]
fn test_price_prefers_metadata() {
    let response: ChartResponse = serde_json::from_value(daily_payload()).unwrap();
    let result = &response.chart.result.as_ref().unwrap()[0];
    assert_eq!(result.price_and_previous_close(), Some((2950.0, 2900.0)));
}

#[test]
fn test_price_falls_back_to_last_closes() {
    let payload = json!({
        "chart": {
            "result": [{
                "meta": { "symbol": "AAPL" },
                "timestamp": [1, 2, 3],
                "indicators": { "quote": [{ "close": [189.0, 190.0, null] }] }
            }],
            "error": null
        }
    });
    let response: ChartResponse = serde_json::from_value(payload).unwrap();
    let result = &response.chart.result.as_ref().unwrap()[0];
    assert_eq!(result.price_and_previous_close(), Some((190.0, 189.0)));
}

#[test]
fn test_error_payload_decodes() {
    let payload = json!({
        "chart": {
            "result": null,
            "error": { "code": "Not Found", "description": "No data found, symbol may be delisted" }
        }
    });
    let response: ChartResponse = serde_json::from_value(payload).unwrap();
    assert!(response.chart.result.is_none());
    assert_eq!(response.chart.error.unwrap().code, "Not Found");
}

#[test]
fn test_fundamentals_from_metadata() {
    let response: ChartResponse = serde_json::from_value(json!({
        "chart": {
            "result": [{
                "meta": {
                    "symbol": "RELIANCE.NS",
                    "currency": "INR",
                    "regularMarketPrice": 2950.0,
                    "regularMarketDayHigh": 2965.5,
                    "regularMarketDayLow": 2921.0,
                    "regularMarketVolume": 4512345,
                    "fiftyTwoWeekHigh": 3217.9,
                    "fiftyTwoWeekLow": 2220.3,
                    "gmtoffset": 19800
                },
                "timestamp": [],
                "indicators": { "quote": [{}] }
            }],
            "error": null
        }
    }))
    .unwrap();
    let result = &response.chart.result.as_ref().unwrap()[0];
    let fundamentals = result.fundamentals();

    assert_eq!(fundamentals.symbol, "RELIANCE.NS");
    assert_eq!(fundamentals.currency.as_deref(), Some("INR"));
    assert_eq!(fundamentals.day_high, Some(2965.5));
    assert_eq!(fundamentals.day_low, Some(2921.0));
    assert_eq!(fundamentals.year_high, Some(3217.9));
    assert_eq!(fundamentals.year_low, Some(2220.3));
    assert_eq!(fundamentals.last_volume, Some(4_512_345.0));
    assert_eq!(fundamentals.market_cap, None);
}
