//! Magnet URI helpers
//!
//! Builds magnet URIs for providers that only return an info hash, and
//! extracts hashes, titles and links from magnet URIs and HTML pages.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static INFO_HASH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)btih:([^&]+)").expect("valid info hash regex")
});

static MAGNET_LINK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"["'](magnet:\?[^"']+)["']"#).expect("valid magnet link regex")
});

/// Build a magnet URI from an info hash, a display title and a tracker list.
///
/// The title is percent-encoded. The hash and trackers are inserted verbatim,
/// callers are responsible for their validity.
pub fn create_magnet_url(info_hash: &str, title: &str, trackers: &[String]) -> String {
    let mut magnet_url = format!(
        "magnet:?xt=urn:btih:{}&dn={}",
        info_hash,
        urlencoding::encode(title)
    );
    for tracker in trackers {
        magnet_url.push_str("&tr=");
        magnet_url.push_str(tracker);
    }
    magnet_url
}

/// Extract the lowercased info hash from a magnet URI
pub fn info_hash_from_magnet(magnet_url: &str) -> Option<String> {
    INFO_HASH_REGEX
        .captures(magnet_url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
        .filter(|hash| !hash.is_empty())
}

/// Extract the decoded display name (`dn`) from a magnet URI
pub fn title_from_magnet(magnet_url: &str) -> Option<String> {
    let parsed = Url::parse(magnet_url).ok()?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == "dn")
        .map(|(_, value)| value.into_owned())
}

/// Find every quoted magnet link in an HTML document, in document order
pub fn find_magnet_links(html: &str) -> Vec<String> {
    MAGNET_LINK_REGEX
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().replace("&amp;", "&"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_magnet_url() {
        let trackers = vec![
            "udp://tracker.opentrackr.org:1337/announce".to_string(),
            "udp://open.demonii.com:1337/announce".to_string(),
        ];
        let magnet = create_magnet_url("ABC123", "Big Buck Bunny (2008)", &trackers);

        assert_eq!(
            magnet,
            "magnet:?xt=urn:btih:ABC123&dn=Big%20Buck%20Bunny%20%282008%29\
             &tr=udp://tracker.opentrackr.org:1337/announce\
             &tr=udp://open.demonii.com:1337/announce"
        );
    }

    #[test]
    fn test_create_magnet_url_without_trackers() {
        let magnet = create_magnet_url("abc", "a&b", &[]);
        assert_eq!(magnet, "magnet:?xt=urn:btih:abc&dn=a%26b");
    }

    #[test]
    fn test_info_hash_from_magnet() {
        let magnet = "magnet:?xt=urn:btih:DEADBEEF&dn=Test&tr=udp://x";
        assert_eq!(info_hash_from_magnet(magnet).as_deref(), Some("deadbeef"));

        let trailing = "magnet:?xt=urn:btih:CAFEBABE";
        assert_eq!(info_hash_from_magnet(trailing).as_deref(), Some("cafebabe"));

        assert_eq!(info_hash_from_magnet("https://example.com"), None);
    }

    #[test]
    fn test_title_from_magnet() {
        let magnet = create_magnet_url("abc", "Big Buck Bunny 1080p", &[]);
        assert_eq!(
            title_from_magnet(&magnet).as_deref(),
            Some("Big Buck Bunny 1080p")
        );
        assert_eq!(title_from_magnet("magnet:?xt=urn:btih:abc"), None);
    }

    #[test]
    fn test_find_magnet_links() {
        let html = r#"
            <a href='magnet:?xt=urn:btih:AAA&amp;dn=First'>one</a>
            <a href="magnet:?xt=urn:btih:BBB&dn=Second">two</a>
            <a href="https://example.com/page">not a magnet</a>
        "#;

        let links = find_magnet_links(html);

        assert_eq!(
            links,
            vec![
                "magnet:?xt=urn:btih:AAA&dn=First".to_string(),
                "magnet:?xt=urn:btih:BBB&dn=Second".to_string(),
            ]
        );
    }
}
