//! Scriptable provider for aggregator tests.

use super::traits::MagnetSearcher;
use crate::results::SearchResult;
use crate::search::CallContext;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

enum Behavior {
    Ok(Vec<SearchResult>),
    Fail(String),
    Panic,
}

/// Provider that answers after a fixed delay with canned results or an error.
pub struct MockProvider {
    behavior: Behavior,
    delay: Duration,
    slow: bool,
    finished: Arc<AtomicBool>,
}

impl MockProvider {
    pub fn ok(results: Vec<SearchResult>) -> Self {
        Self::with_behavior(Behavior::Ok(results))
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Fail(message.into()))
    }

    pub fn panicking() -> Self {
        Self::with_behavior(Behavior::Panic)
    }

    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            delay: Duration::ZERO,
            slow: false,
            finished: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn slow(mut self) -> Self {
        self.slow = true;
        self
    }

    /// Flag set once the search ran to completion, even if nobody listened.
    pub fn finished_flag(&self) -> Arc<AtomicBool> {
        self.finished.clone()
    }
}

#[async_trait]
impl MagnetSearcher for MockProvider {
    async fn search(
        &self,
        _ctx: &CallContext,
        _imdb_id: &str,
    ) -> anyhow::Result<Vec<SearchResult>> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.finished.store(true, Ordering::SeqCst);

        match &self.behavior {
            Behavior::Ok(results) => Ok(results.clone()),
            Behavior::Fail(message) => Err(anyhow::anyhow!("{}", message)),
            Behavior::Panic => panic!("mock provider panicked"),
        }
    }

    fn is_slow(&self) -> bool {
        self.slow
    }
}

/// Shorthand for a result with only the fields tests care about.
pub fn result(info_hash: &str, quality: &str) -> SearchResult {
    SearchResult::new(
        format!("Big Buck Bunny {}", quality),
        quality,
        info_hash,
        format!("magnet:?xt=urn:btih:{}", info_hash),
    )
}
