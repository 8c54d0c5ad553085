//! Stock analysis: technical indicators, BUY/SELL/HOLD classification
//! against a reference index, and the services around them.

pub mod common;
pub mod config;
pub mod core;
pub mod display;
pub mod forecast;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
