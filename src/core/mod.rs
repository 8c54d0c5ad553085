//! Application services (analysis, HTTP API, quote polling)

pub mod analysis;
pub mod http;
pub mod scheduler;

pub use analysis::*;
pub use http::*;
pub use scheduler::*;
