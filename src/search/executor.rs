//! Search execution and orchestration

use super::models::{CallContext, ProviderOutcome};
use super::supervisor::Supervisor;
use crate::config::SearchSettings;
use crate::error::{ProviderFailure, SearchError};
use crate::metrics::Metrics;
use crate::providers::{MagnetSearcher, ProviderRegistry};
use crate::results::{dedup_by_info_hash, SearchResult};
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Aggregator that searches all registered providers concurrently
pub struct Aggregator {
    /// Provider registry
    registry: Arc<ProviderRegistry>,
    /// Timeout for regular providers
    timeout: Duration,
    /// Timeout for providers flagged as slow
    slow_timeout: Duration,
    /// Optional statistics sink
    metrics: Option<Arc<Metrics>>,
}

impl Aggregator {
    /// Create a new aggregator with the default timeouts
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self {
            registry,
            timeout: Duration::from_secs(crate::DEFAULT_TIMEOUT),
            slow_timeout: Duration::from_secs(crate::SLOW_PROVIDER_TIMEOUT),
            metrics: None,
        }
    }

    /// Create an aggregator with the timeouts from the search settings
    pub fn with_settings(registry: Arc<ProviderRegistry>, settings: &SearchSettings) -> Self {
        Self::new(registry)
            .with_timeout(settings.timeout())
            .with_slow_timeout(settings.slow_timeout())
    }

    /// Set timeout for regular providers
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set timeout for slow providers
    pub fn with_slow_timeout(mut self, timeout: Duration) -> Self {
        self.slow_timeout = timeout;
        self
    }

    /// Record per-provider statistics
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Configured providers, for introspection
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Time budget for a single provider
    pub fn budget_for(&self, provider: &dyn MagnetSearcher) -> Duration {
        if provider.is_slow() {
            self.slow_timeout
        } else {
            self.timeout
        }
    }

    /// Find torrents for the given IMDb ID on all providers.
    ///
    /// Returns an error only if every provider returned an error. Timeouts
    /// count as "no results", so a call where some or all providers time out
    /// succeeds, possibly with an empty list. The returned list never holds
    /// two results with the same info_hash.
    pub async fn find_results(
        &self,
        ctx: &CallContext,
        imdb_id: &str,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let provider_count = self.registry.len();
        if let Some(ref metrics) = self.metrics {
            metrics.inc_search();
        }

        info!(
            imdb_id = %imdb_id,
            "Searching torrents on {} providers",
            provider_count
        );

        let imdb_id: Arc<str> = Arc::from(imdb_id);

        // One supervisor task per provider. Each one bounds its own wait, so
        // collecting below never takes longer than the largest budget.
        let mut pending: FuturesUnordered<_> = self
            .registry
            .iter()
            .enumerate()
            .map(|(index, (name, provider))| {
                let supervisor = Supervisor {
                    name: name.to_string(),
                    provider: provider.clone(),
                    budget: self.budget_for(provider.as_ref()),
                    metrics: self.metrics.clone(),
                };
                let handle = tokio::spawn(supervisor.run(ctx.clone(), imdb_id.clone()));
                let name = name.to_string();
                async move { (index, name, handle.await) }
            })
            .collect();

        let mut combined = Vec::new();
        let mut failures = Vec::new();
        let mut contributing = 0usize;

        while let Some((index, name, joined)) = pending.next().await {
            let outcome = joined.unwrap_or_else(|e| {
                ProviderOutcome::Failure(anyhow::anyhow!("supervisor for {} failed: {}", name, e))
            });
            match outcome {
                ProviderOutcome::Success(results) => {
                    if !results.is_empty() {
                        contributing += 1;
                    }
                    combined.extend(results);
                }
                ProviderOutcome::Failure(error) => {
                    failures.push(ProviderFailure {
                        index,
                        provider: name,
                        error,
                    });
                }
                ProviderOutcome::TimedOut => {}
            }
        }

        if provider_count > 0 && failures.len() == provider_count {
            failures.sort_by_key(|f| f.index);
            let err = SearchError::AllProvidersFailed { failures };
            warn!(imdb_id = %imdb_id, "{}", err);
            return Err(err);
        }

        // Duplicates can only come from different providers
        let results = if contributing > 1 {
            dedup_by_info_hash(combined)
        } else {
            combined
        };

        if results.is_empty() {
            warn!(imdb_id = %imdb_id, "Couldn't find ANY torrents");
        } else {
            debug!(
                imdb_id = %imdb_id,
                count = results.len(),
                failed = failures.len(),
                "Collected torrents"
            );
        }

        Ok(results)
    }
}
