//! Application state shared across handlers

use crate::config::Settings;
use crate::metrics::Metrics;
use crate::providers::ProviderRegistry;
use crate::search::Aggregator;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Search aggregator
    pub aggregator: Arc<Aggregator>,
    /// Provider statistics
    pub metrics: Arc<Metrics>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings, registry: ProviderRegistry) -> Self {
        let metrics = Arc::new(Metrics::new());
        let aggregator = Aggregator::with_settings(Arc::new(registry), &settings.search)
            .with_metrics(metrics.clone());

        Self {
            settings: Arc::new(settings),
            aggregator: Arc::new(aggregator),
            metrics,
        }
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }
}
