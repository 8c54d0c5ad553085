//! Display-side state for the live ticker.

pub mod board;

pub use board::{PriceMove, TickerBoard, TickerCard};
