//! URL rebasing for proxied provider requests

use crate::error::UrlError;
use url::Url;

/// Replace the scheme and host of `orig_url` with `new_base_url`.
///
/// `new_base_url` is usually a reverse proxy in front of the original site,
/// e.g. `https://yts.example-proxy.net`. Path, query and fragment are kept
/// exactly as written in `orig_url`.
pub fn replace_url(orig_url: &str, new_base_url: &str) -> Result<String, UrlError> {
    let parsed = Url::parse(orig_url).map_err(|source| UrlError::Malformed {
        url: orig_url.to_string(),
        source,
    })?;
    if parsed.host_str().is_none() {
        return Err(UrlError::MissingHost {
            url: orig_url.to_string(),
        });
    }

    // A URL with a host always serializes its authority after "://"
    let authority_start = orig_url.find("://").map(|i| i + 3).unwrap_or(0);
    let rest = orig_url[authority_start..]
        .find(['/', '?', '#'])
        .map(|i| &orig_url[authority_start + i..])
        .unwrap_or("");

    Ok(format!("{}{}", new_base_url.trim_end_matches('/'), rest))
}
