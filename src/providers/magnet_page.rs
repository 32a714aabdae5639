//! Generic provider that scrapes magnet links from an HTML page

use super::quality::quality_from_name;
use super::rebased;
use super::traits::MagnetSearcher;
use crate::magnet::{find_magnet_links, info_hash_from_magnet, title_from_magnet};
use crate::network::HttpClient;
use crate::results::SearchResult;
use crate::search::CallContext;
use anyhow::{ensure, Result};
use async_trait::async_trait;
use tracing::debug;

/// Placeholder replaced by the IMDb ID in the page URL template
pub const ID_PLACEHOLDER: &str = "{id}";

/// Scrapes every quoted magnet link from a search page, e.g.
/// `https://torrents.example/search/{id}`
pub struct MagnetPage {
    client: HttpClient,
    url_template: String,
    base_url: Option<String>,
    slow: bool,
}

impl MagnetPage {
    pub fn new(client: HttpClient, url_template: impl Into<String>) -> Result<Self> {
        let url_template = url_template.into();
        ensure!(
            url_template.contains(ID_PLACEHOLDER),
            "URL template must contain {}: {}",
            ID_PLACEHOLDER,
            url_template
        );
        Ok(Self {
            client,
            url_template,
            base_url: None,
            slow: false,
        })
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

    fn to_results(html: &str) -> Vec<SearchResult> {
        find_magnet_links(html)
            .into_iter()
            .filter_map(|magnet_url| {
                let info_hash = info_hash_from_magnet(&magnet_url)?;
                let title = title_from_magnet(&magnet_url).unwrap_or_default();
                let quality = quality_from_name(&title)?;
                Some(SearchResult::new(title, quality, info_hash, magnet_url))
            })
            .collect()
    }
}

#[async_trait]
impl MagnetSearcher for MagnetPage {
    async fn search(&self, ctx: &CallContext, imdb_id: &str) -> Result<Vec<SearchResult>> {
        let url = self
            .url_template
            .replace(ID_PLACEHOLDER, &urlencoding::encode(imdb_id));
        let url = rebased(url, self.base_url.as_deref())?;

        let html = ctx.until_cancelled(self.client.get_text(&url)).await?;
        let results = Self::to_results(&html);
        debug!("Page {} contained {} usable magnet links", url, results.len());
        Ok(results)
    }

    fn is_slow(&self) -> bool {
        self.slow
    }
}
