//! YTS provider, backed by the public YTS JSON API

use super::rebased;
use super::traits::MagnetSearcher;
use crate::magnet::create_magnet_url;
use crate::network::HttpClient;
use crate::results::SearchResult;
use crate::search::CallContext;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://yts.mx";

#[derive(Debug, Deserialize)]
struct ListMoviesResponse {
    status: String,
    #[serde(default)]
    status_message: String,
    #[serde(default)]
    data: ListMoviesData,
}

#[derive(Debug, Default, Deserialize)]
struct ListMoviesData {
    #[serde(default)]
    movies: Option<Vec<Movie>>,
}

#[derive(Debug, Deserialize)]
struct Movie {
    title: String,
    #[serde(default)]
    title_long: String,
    #[serde(default)]
    torrents: Vec<Torrent>,
}

#[derive(Debug, Deserialize)]
struct Torrent {
    hash: String,
    quality: String,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    bit_depth: String,
}

/// YTS search provider
pub struct Yts {
    client: HttpClient,
    base_url: Option<String>,
    trackers: Vec<String>,
    slow: bool,
}

impl Yts {
    pub fn new(client: HttpClient, trackers: Vec<String>) -> Self {
        Self {
            client,
            base_url: None,
            trackers,
            slow: false,
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

    fn to_results(&self, movies: Vec<Movie>) -> Vec<SearchResult> {
        let mut results = Vec::new();
        for movie in movies {
            let title = if movie.title_long.is_empty() {
                movie.title
            } else {
                movie.title_long
            };
            for torrent in movie.torrents {
                let Some(quality) = quality_label(&torrent) else {
                    continue;
                };
                let info_hash = torrent.hash.to_lowercase();
                let magnet_url = create_magnet_url(&info_hash, &title, &self.trackers);
                results.push(SearchResult::new(title.clone(), quality, info_hash, magnet_url));
            }
        }
        results
    }
}

fn quality_label(torrent: &Torrent) -> Option<String> {
    if !matches!(torrent.quality.as_str(), "720p" | "1080p" | "2160p") {
        return None;
    }
    let mut quality = torrent.quality.clone();
    if torrent.bit_depth == "10" {
        quality.push_str(" 10bit");
    }
    if torrent.kind == "web" {
        quality.push_str(" (web)");
    }
    Some(quality)
}

#[async_trait]
impl MagnetSearcher for Yts {
    async fn search(&self, ctx: &CallContext, imdb_id: &str) -> Result<Vec<SearchResult>> {
        let url = format!(
            "{}/api/v2/list_movies.json?query_term={}",
            DEFAULT_BASE_URL,
            urlencoding::encode(imdb_id)
        );
        let url = rebased(url, self.base_url.as_deref())?;

        let response: ListMoviesResponse = ctx.until_cancelled(self.client.get_json(&url)).await?;
        if response.status != "ok" {
            return Err(anyhow!(
                "Bad status in YTS response: {} ({})",
                response.status,
                response.status_message
            ));
        }

        let results = self.to_results(response.data.movies.unwrap_or_default());
        debug!("YTS returned {} usable torrents for {}", results.len(), imdb_id);
        Ok(results)
    }

    fn is_slow(&self) -> bool {
        self.slow
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FIXTURE: &str = r#"{
        "status": "ok",
        "status_message": "Query was successful",
        "data": {
            "movie_count": 1,
            "movies": [{
                "title": "Big Buck Bunny",
                "title_long": "Big Buck Bunny (2008)",
                "torrents": [
                    {"hash": "AAAA1111", "quality": "720p", "type": "web", "bit_depth": "8"},
                    {"hash": "BBBB2222", "quality": "1080p", "type": "bluray", "bit_depth": "10"},
                    {"hash": "CCCC3333", "quality": "3D", "type": "bluray", "bit_depth": "8"}
                ]
            }]
        }
    }"#;

    fn provider_for(server: &MockServer) -> Yts {
        Yts::new(HttpClient::new().unwrap(), vec!["udp://tracker.example:1337".to_string()])
            .with_base_url(server.uri())
    }

    #[tokio::test]
    async fn test_parses_torrents() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/list_movies.json"))
            .and(query_param("query_term", "tt1254207"))
            .respond_with(ResponseTemplate::new(200).set_body_string(FIXTURE))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let results = provider
            .search(&CallContext::new(), "tt1254207")
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Big Buck Bunny (2008)");
        assert_eq!(results[0].quality, "720p (web)");
        assert_eq!(results[0].info_hash, "aaaa1111");
        assert!(results[0]
            .magnet_url
            .starts_with("magnet:?xt=urn:btih:aaaa1111&dn=Big%20Buck%20Bunny%20%282008%29"));
        assert!(results[0].magnet_url.ends_with("&tr=udp://tracker.example:1337"));
        assert_eq!(results[1].quality, "1080p 10bit");
    }

    #[tokio::test]
    async fn test_no_movies_is_empty_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"status":"ok","status_message":"Query was successful","data":{"movie_count":0}}"#,
            ))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let results = provider.search(&CallContext::new(), "tt0000000").await;

        let results = tokio_test::assert_ok!(results);
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_bad_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"status":"error","status_message":"Rate limited"}"#,
            ))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider
            .search(&CallContext::new(), "tt1254207")
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Rate limited"));
    }

    #[tokio::test]
    async fn test_cancel_stops_pending_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(FIXTURE)
                    .set_delay(std::time::Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let ctx = CallContext::new();
        let canceller = ctx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            canceller.cancel();
        });

        let start = std::time::Instant::now();
        let err = provider.search(&ctx, "tt1254207").await.unwrap_err();

        assert_eq!(err.to_string(), "search cancelled by caller");
        assert!(start.elapsed() < std::time::Duration::from_secs(5));
    }
}
