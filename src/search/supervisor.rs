//! Per-provider deadline enforcement

use super::models::{CallContext, ProviderOutcome};
use crate::metrics::Metrics;
use crate::providers::MagnetSearcher;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Races one provider's search against that provider's own deadline
pub(crate) struct Supervisor {
    pub name: String,
    pub provider: Arc<dyn MagnetSearcher>,
    pub budget: Duration,
    pub metrics: Option<Arc<Metrics>>,
}

impl Supervisor {
    /// Produce exactly one outcome for this provider.
    ///
    /// On timeout the search task is neither cancelled nor awaited. It keeps
    /// running under the call context and its late result is dropped.
    pub async fn run(self, ctx: CallContext, imdb_id: Arc<str>) -> ProviderOutcome {
        debug!(provider = %self.name, imdb_id = %imdb_id, "Finding torrents...");
        if let Some(ref metrics) = self.metrics {
            metrics.record_provider_search(&self.name);
        }

        let start = Instant::now();
        // Capacity-one channel: the search task's send never blocks, even when
        // nobody is listening anymore.
        let (tx, rx) = oneshot::channel();

        let provider = self.provider.clone();
        let name = self.name.clone();
        let search_id = imdb_id.clone();
        tokio::spawn(async move {
            let result = ctx.until_cancelled(provider.search(&ctx, &search_id)).await;
            let duration_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(results) => debug!(
                    provider = %name,
                    imdb_id = %search_id,
                    count = results.len(),
                    duration_ms,
                    "Found torrents"
                ),
                Err(e) => warn!(
                    provider = %name,
                    imdb_id = %search_id,
                    duration_ms,
                    "Couldn't find torrents: {}",
                    e
                ),
            }
            let _ = tx.send(result);
        });

        // Fresh timer per provider
        let deadline = tokio::time::sleep(self.budget);

        let outcome = tokio::select! {
            received = rx => match received {
                Ok(Ok(results)) => ProviderOutcome::Success(results),
                Ok(Err(e)) => ProviderOutcome::Failure(e),
                Err(_) => ProviderOutcome::Failure(anyhow::anyhow!(
                    "search task for {} ended without reporting a result",
                    self.name
                )),
            },
            _ = deadline => {
                warn!(
                    provider = %self.name,
                    imdb_id = %imdb_id,
                    budget_ms = self.budget.as_millis() as u64,
                    "Finding torrents timed out. It will continue to run in the background."
                );
                ProviderOutcome::TimedOut
            }
        };

        if let Some(ref metrics) = self.metrics {
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &outcome {
                ProviderOutcome::Success(_) => metrics.record_success(&self.name, elapsed_ms),
                ProviderOutcome::Failure(_) => metrics.record_failure(&self.name),
                ProviderOutcome::TimedOut => metrics.record_timeout(&self.name),
            }
        }

        outcome
    }
}
