//! Yahoo Finance chart API provider.

pub mod messages;
pub mod provider;

pub use provider::YahooFinanceProvider;
