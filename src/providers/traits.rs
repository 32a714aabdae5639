//! Provider trait

use crate::results::SearchResult;
use crate::search::CallContext;
use async_trait::async_trait;

/// A torrent search backend
///
/// Implementations are free to do network I/O, retries or caching
/// internally. The aggregator only sees the returned results or error.
///
/// Searches keep running after the aggregator stops waiting for them, so
/// implementations should wrap their I/O in
/// [`CallContext::until_cancelled`] to stop once the caller cancels.
#[async_trait]
pub trait MagnetSearcher: Send + Sync {
    /// Find torrents for the given IMDb ID
    async fn search(&self, ctx: &CallContext, imdb_id: &str) -> anyhow::Result<Vec<SearchResult>>;

    /// Whether this provider gets the short slow-provider timeout instead of
    /// the default one. Static per provider.
    fn is_slow(&self) -> bool {
        false
    }
}
