//! Deduplication of merged provider results by info_hash.

use super::types::SearchResult;
use std::collections::HashSet;

/// Remove results whose info_hash was already seen.
///
/// The first occurrence wins and the relative order of the kept results is
/// preserved. Hashes are compared verbatim; providers normalize them to
/// lowercase when building results.
pub fn dedup_by_info_hash(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut seen: HashSet<String> = HashSet::with_capacity(results.len());

    results
        .into_iter()
        .filter(|result| seen.insert(result.info_hash.clone()))
        .collect()
}
