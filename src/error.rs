//! Error types returned by the aggregator and its utilities

use thiserror::Error;

/// A single provider's failure, recorded during a search call
#[derive(Debug)]
pub struct ProviderFailure {
    /// Position of the provider in registry order (0-based)
    pub index: usize,
    /// Provider name
    pub provider: String,
    /// Underlying error reported by the provider
    pub error: anyhow::Error,
}

/// Errors surfaced by [`crate::search::Aggregator::find_results`]
#[derive(Debug, Error)]
pub enum SearchError {
    /// Every registered provider returned an error. Timeouts never count.
    #[error("Couldn't find torrents on any site: {}", format_failures(.failures))]
    AllProvidersFailed { failures: Vec<ProviderFailure> },
}

impl SearchError {
    /// Individual failures, in registry order
    pub fn failures(&self) -> &[ProviderFailure] {
        match self {
            Self::AllProvidersFailed { failures } => failures,
        }
    }
}

fn format_failures(failures: &[ProviderFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{}.: {}", f.index + 1, f.error))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors from URL helpers
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Couldn't parse URL. URL: {url}; error: {source}")]
    Malformed {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("URL has no host to replace: {url}")]
    MissingHost { url: String },
}
