//! MagnetSearch-RS: concurrent magnet link search over multiple torrent sites
//!
//! Fans a single IMDb ID out to every configured provider, bounds each one by
//! its own timeout, and merges whatever came back in time into one
//! deduplicated list.

pub mod config;
pub mod error;
pub mod magnet;
pub mod metrics;
pub mod network;
pub mod providers;
pub mod results;
pub mod search;
pub mod web;

pub use config::Settings;
pub use error::{SearchError, UrlError};
pub use providers::{MagnetSearcher, ProviderRegistry};
pub use results::SearchResult;
pub use search::{Aggregator, CallContext};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default timeout for provider searches in seconds
pub const DEFAULT_TIMEOUT: u64 = 5;

/// Timeout for providers flagged as slow, in seconds
pub const SLOW_PROVIDER_TIMEOUT: u64 = 2;
