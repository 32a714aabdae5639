//! Provider registry

use super::traits::MagnetSearcher;
use std::sync::Arc;

/// Registry of configured providers, keyed by unique name.
///
/// Built once at startup and read-only afterwards. Iteration follows
/// registration order.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: Vec<(String, Arc<dyn MagnetSearcher>)>,
}

impl ProviderRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider. A provider already registered under the same
    /// name is replaced in place.
    pub fn register(&mut self, name: impl Into<String>, provider: Arc<dyn MagnetSearcher>) {
        let name = name.into();
        match self.providers.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = provider,
            None => self.providers.push((name, provider)),
        }
    }

    /// Builder-style [`register`](Self::register)
    pub fn with(mut self, name: impl Into<String>, provider: Arc<dyn MagnetSearcher>) -> Self {
        self.register(name, provider);
        self
    }

    /// Get a provider by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn MagnetSearcher>> {
        self.providers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| p)
    }

    /// Iterate over (name, provider) pairs in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn MagnetSearcher>)> {
        self.providers.iter().map(|(n, p)| (n.as_str(), p))
    }

    /// Get all provider names
    pub fn names(&self) -> Vec<&str> {
        self.providers.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Get number of registered providers
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.names())
            .finish()
    }
}
