//! Quality label inference from torrent names

/// Infer a quality label like "1080p", "2160p 10bit" or "720p (web)" from a
/// torrent name. Returns `None` for anything below 720p or without a
/// recognizable resolution.
pub fn quality_from_name(name: &str) -> Option<String> {
    let lower = name.to_lowercase();

    let resolution = if lower.contains("2160p") || lower.contains("4k") || lower.contains("uhd") {
        "2160p"
    } else if lower.contains("1080p") {
        "1080p"
    } else if lower.contains("720p") {
        "720p"
    } else {
        return None;
    };

    let mut quality = resolution.to_string();
    if lower.contains("10bit") || lower.contains("10-bit") || lower.contains("10 bit") {
        quality.push_str(" 10bit");
    }
    if lower.contains("web-dl")
        || lower.contains("webrip")
        || lower.contains("web.")
        || lower.contains("webdl")
    {
        quality.push_str(" (web)");
    }
    Some(quality)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolutions() {
        assert_eq!(quality_from_name("Movie.2008.720p.BluRay.x264").as_deref(), Some("720p"));
        assert_eq!(quality_from_name("Movie 2008 1080p BrRip").as_deref(), Some("1080p"));
        assert_eq!(quality_from_name("Movie.2008.4K.HDR").as_deref(), Some("2160p"));
        assert_eq!(quality_from_name("Movie.2008.2160p.UHD").as_deref(), Some("2160p"));
    }

    #[test]
    fn test_tags() {
        assert_eq!(
            quality_from_name("Movie.2008.1080p.WEB-DL.10bit.x265").as_deref(),
            Some("1080p 10bit (web)")
        );
        assert_eq!(quality_from_name("Movie 720p WEBRip").as_deref(), Some("720p (web)"));
    }

    #[test]
    fn test_low_quality_is_dropped() {
        assert_eq!(quality_from_name("Movie.2008.480p.DVDRip"), None);
        assert_eq!(quality_from_name("Movie.2008.CAM"), None);
    }
}
