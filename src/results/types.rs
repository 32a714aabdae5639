//! Result type definitions

use serde::{Deserialize, Serialize};

/// A single torrent found by a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Movie title, e.g. "Big Buck Bunny"
    pub title: String,
    /// Video resolution and source, e.g. "720p" or "720p (web)"
    pub quality: String,
    /// Torrent info_hash
    pub info_hash: String,
    /// Magnet URL, usually containing the info_hash, torrent name and a list of trackers
    pub magnet_url: String,
}

impl SearchResult {
    /// Create a new result
    pub fn new(
        title: impl Into<String>,
        quality: impl Into<String>,
        info_hash: impl Into<String>,
        magnet_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            quality: quality.into(),
            info_hash: info_hash.into(),
            magnet_url: magnet_url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_serializes_with_snake_case_fields() {
        let result =
            SearchResult::new("Big Buck Bunny", "720p (web)", "abc", "magnet:?xt=urn:btih:abc");
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["title"], "Big Buck Bunny");
        assert_eq!(json["quality"], "720p (web)");
        assert_eq!(json["info_hash"], "abc");
        assert_eq!(json["magnet_url"], "magnet:?xt=urn:btih:abc");
    }
}
