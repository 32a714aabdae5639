//! Search orchestration module
//!
//! Fans a search out to every registered provider, bounds each provider by
//! its own deadline and merges what came back in time.

mod executor;
mod models;
mod supervisor;

pub use executor::Aggregator;
pub use models::*;
