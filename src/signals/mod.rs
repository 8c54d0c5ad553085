//! Signal evaluation interfaces.

pub mod alert;
pub mod classifier;
pub mod engine;

pub use alert::*;
pub use classifier::*;
pub use engine::SignalEngine;
