//! HTTP networking module
//!
//! Provides the HTTP client shared by providers and the URL rebasing helper
//! used to route provider requests through a configured proxy.

mod client;
mod rebase;

pub use client::HttpClient;
pub use rebase::replace_url;
