//! Metrics collection module
//!
//! Tracks provider response times, error and timeout rates, and usage statistics.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

/// Number of response times kept per provider
const RESPONSE_TIME_WINDOW: usize = 100;

#[derive(Debug, Default)]
struct Counters {
    searches: u64,
    successes: u64,
    failures: u64,
    timeouts: u64,
    response_times: Vec<u64>,
}

/// Global metrics collector
pub struct Metrics {
    /// Total aggregated search count
    total_searches: AtomicU64,
    /// Counters per provider
    providers: RwLock<HashMap<String, Counters>>,
}

impl Metrics {
    /// Create a new metrics instance
    pub fn new() -> Self {
        Self {
            total_searches: AtomicU64::new(0),
            providers: RwLock::new(HashMap::new()),
        }
    }

    /// Increment total search count
    pub fn inc_search(&self) {
        self.total_searches.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a provider search start
    pub fn record_provider_search(&self, provider: &str) {
        self.update(provider, |c| c.searches += 1);
    }

    /// Record a provider answering in time, with its response time
    pub fn record_success(&self, provider: &str, time_ms: u64) {
        self.update(provider, |c| {
            c.successes += 1;
            // Keep last RESPONSE_TIME_WINDOW response times
            if c.response_times.len() >= RESPONSE_TIME_WINDOW {
                c.response_times.remove(0);
            }
            c.response_times.push(time_ms);
        });
    }

    /// Record a provider error
    pub fn record_failure(&self, provider: &str) {
        self.update(provider, |c| c.failures += 1);
    }

    /// Record a provider exceeding its budget
    pub fn record_timeout(&self, provider: &str) {
        self.update(provider, |c| c.timeouts += 1);
    }

    fn update(&self, provider: &str, f: impl FnOnce(&mut Counters)) {
        let mut providers = self
            .providers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        f(providers.entry(provider.to_string()).or_default());
    }

    /// Get total searches
    pub fn get_total_searches(&self) -> u64 {
        self.total_searches.load(Ordering::Relaxed)
    }

    /// Get all provider statistics
    pub fn get_provider_stats(&self) -> HashMap<String, ProviderStats> {
        let providers = self
            .providers
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        providers
            .iter()
            .map(|(name, c)| (name.clone(), c.stats()))
            .collect()
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics for a single provider
#[derive(Debug, Clone, Serialize)]
pub struct ProviderStats {
    pub searches: u64,
    pub successes: u64,
    pub failures: u64,
    pub timeouts: u64,
    pub avg_response_time: Option<u64>,
    /// Share of finished searches that succeeded, in percent
    pub reliability: f64,
}

impl Counters {
    fn stats(&self) -> ProviderStats {
        let avg_response_time = if self.response_times.is_empty() {
            None
        } else {
            Some(self.response_times.iter().sum::<u64>() / self.response_times.len() as u64)
        };

        let total = self.successes + self.failures + self.timeouts;
        let reliability = if total == 0 {
            100.0
        } else {
            (self.successes as f64 / total as f64) * 100.0
        };

        ProviderStats {
            searches: self.searches,
            successes: self.successes,
            failures: self.failures,
            timeouts: self.timeouts,
            avg_response_time,
            reliability,
        }
    }
}
