//! The Pirate Bay provider, backed by the apibay JSON API

use super::quality::quality_from_name;
use super::rebased;
use super::traits::MagnetSearcher;
use crate::magnet::create_magnet_url;
use crate::network::HttpClient;
use crate::results::SearchResult;
use crate::search::CallContext;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://apibay.org";
/// apibay's "Video" category
const VIDEO_CATEGORY: &str = "200";

#[derive(Debug, Deserialize)]
struct Torrent {
    id: String,
    name: String,
    info_hash: String,
    #[serde(default)]
    imdb: Option<String>,
}

/// The Pirate Bay search provider
pub struct Tpb {
    client: HttpClient,
    base_url: Option<String>,
    trackers: Vec<String>,
    slow: bool,
}

impl Tpb {
    pub fn new(client: HttpClient, trackers: Vec<String>) -> Self {
        Self {
            client,
            base_url: None,
            trackers,
            slow: true,
        }
    }

    /// Route requests through another base URL, e.g. a proxy
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_slow(mut self, slow: bool) -> Self {
        self.slow = slow;
        self
    }

    fn to_results(&self, imdb_id: &str, torrents: Vec<Torrent>) -> Vec<SearchResult> {
        torrents
            .into_iter()
            // A single entry with id "0" means "No results returned"
            .filter(|t| t.id != "0")
            .filter(|t| match t.imdb.as_deref() {
                Some(imdb) if !imdb.is_empty() => imdb == imdb_id,
                _ => true,
            })
            .filter_map(|t| {
                let quality = quality_from_name(&t.name)?;
                let info_hash = t.info_hash.to_lowercase();
                let magnet_url = create_magnet_url(&info_hash, &t.name, &self.trackers);
                Some(SearchResult::new(t.name, quality, info_hash, magnet_url))
            })
            .collect()
    }
}

#[async_trait]
impl MagnetSearcher for Tpb {
    async fn search(&self, ctx: &CallContext, imdb_id: &str) -> Result<Vec<SearchResult>> {
        let url = format!(
            "{}/q.php?q={}&cat={}",
            DEFAULT_BASE_URL,
            urlencoding::encode(imdb_id),
            VIDEO_CATEGORY
        );
        let url = rebased(url, self.base_url.as_deref())?;

        let torrents: Vec<Torrent> = ctx.until_cancelled(self.client.get_json(&url)).await?;
        let results = self.to_results(imdb_id, torrents);
        debug!("TPB returned {} usable torrents for {}", results.len(), imdb_id);
        Ok(results)
    }

    fn is_slow(&self) -> bool {
        self.slow
    }
}
