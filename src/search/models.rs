//! Call context and per-provider outcome

use crate::results::SearchResult;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Context of one aggregated search call.
///
/// Carries the caller's cancellation signal. Every provider search spawned
/// for the call gets a clone; cancelling the caller's token stops all of
/// them, including searches the aggregator already gave up on.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    cancellation: CancellationToken,
}

impl CallContext {
    /// Create a context that is never cancelled unless [`cancel`](Self::cancel) is called
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context bound to the caller's token
    pub fn with_cancellation(cancellation: CancellationToken) -> Self {
        Self { cancellation }
    }

    /// Cancel every search running under this context
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    /// Drive `fut` to completion unless the context is cancelled first, in
    /// which case `fut` is dropped and an error is returned.
    pub async fn until_cancelled<T, F>(&self, fut: F) -> anyhow::Result<T>
    where
        F: Future<Output = anyhow::Result<T>>,
    {
        tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => {
                Err(anyhow::anyhow!("search cancelled by caller"))
            }
            result = fut => result,
        }
    }
}

/// What one provider contributed to a search call
#[derive(Debug)]
pub enum ProviderOutcome {
    /// The search finished in time
    Success(Vec<SearchResult>),
    /// The search finished in time with an error
    Failure(anyhow::Error),
    /// The deadline elapsed first; the search keeps running unobserved
    TimedOut,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_until_cancelled_passes_result_through() {
        let ctx = CallContext::new();
        let value = ctx.until_cancelled(async { Ok(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_until_cancelled_stops_pending_work() {
        let ctx = CallContext::new();
        let canceller = ctx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            canceller.cancel();
        });

        let err = ctx
            .until_cancelled(async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(())
            })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "search cancelled by caller");
    }

    #[tokio::test]
    async fn test_until_cancelled_on_cancelled_context() {
        let ctx = CallContext::new();
        ctx.cancel();
        let result = ctx.until_cancelled(async { Ok("late") }).await;
        assert!(result.is_err());
    }
}
