//! Provider loader for initializing providers from configuration

use super::magnet_page::MagnetPage;
use super::registry::ProviderRegistry;
use super::tpb::Tpb;
use super::traits::MagnetSearcher;
use super::yts::Yts;
use crate::config::{ProviderConfig, Settings};
use crate::network::HttpClient;
use anyhow::{anyhow, Result};
use std::sync::Arc;
use tracing::{info, warn};

/// Loader for initializing providers from configuration
pub struct ProviderLoader;

impl ProviderLoader {
    /// Load all enabled providers from settings.
    ///
    /// Providers that fail to initialize are skipped with a warning.
    pub fn load(settings: &Settings, client: &HttpClient) -> ProviderRegistry {
        let mut registry = ProviderRegistry::new();

        let enabled = settings.enabled_providers();
        let disabled = settings.providers.len() - enabled.len();
        if disabled > 0 {
            info!("Skipping {} disabled providers", disabled);
        }

        for config in enabled {
            match Self::create_provider(config, client, &settings.search.trackers) {
                Ok(provider) => {
                    info!(
                        "Loaded provider: {} ({}, slow: {})",
                        config.name,
                        config.kind,
                        provider.is_slow()
                    );
                    registry.register(config.name.clone(), provider);
                }
                Err(e) => {
                    warn!("Failed to load provider {}: {}", config.name, e);
                }
            }
        }

        info!("Loaded {} providers", registry.len());
        registry
    }

    /// Create a provider instance from its configuration
    fn create_provider(
        config: &ProviderConfig,
        client: &HttpClient,
        trackers: &[String],
    ) -> Result<Arc<dyn MagnetSearcher>> {
        let provider: Arc<dyn MagnetSearcher> = match config.kind.as_str() {
            "yts" => {
                let mut yts = Yts::new(client.clone(), trackers.to_vec());
                if let Some(ref base) = config.base_url {
                    yts = yts.with_base_url(base);
                }
                if let Some(slow) = config.slow {
                    yts = yts.with_slow(slow);
                }
                Arc::new(yts)
            }
            "tpb" => {
                let mut tpb = Tpb::new(client.clone(), trackers.to_vec());
                if let Some(ref base) = config.base_url {
                    tpb = tpb.with_base_url(base);
                }
                if let Some(slow) = config.slow {
                    tpb = tpb.with_slow(slow);
                }
                Arc::new(tpb)
            }
            "magnet_page" => {
                let template = config
                    .url_template
                    .as_deref()
                    .ok_or_else(|| anyhow!("magnet_page provider requires url_template"))?;
                let mut page = MagnetPage::new(client.clone(), template)?;
                if let Some(ref base) = config.base_url {
                    page = page.with_base_url(base);
                }
                if let Some(slow) = config.slow {
                    page = page.with_slow(slow);
                }
                Arc::new(page)
            }
            _ => {
                return Err(anyhow!(
                    "Unknown provider kind: {} (available: {})",
                    config.kind,
                    Self::available_providers().join(", ")
                ));
            }
        };

        Ok(provider)
    }

    /// Get list of available provider kinds
    pub fn available_providers() -> Vec<&'static str> {
        vec!["yts", "tpb", "magnet_page"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(name: &str, kind: &str) -> ProviderConfig {
        ProviderConfig {
            name: name.to_string(),
            kind: kind.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_load_defaults() {
        let settings = Settings::default();
        let registry = ProviderLoader::load(&settings, &HttpClient::new().unwrap());

        assert_eq!(registry.names(), vec!["yts", "tpb"]);
        assert!(!registry.get("yts").unwrap().is_slow());
        assert!(registry.get("tpb").unwrap().is_slow());
    }

    #[test]
    fn test_load_skips_disabled_unknown_and_invalid() {
        let mut settings = Settings::default();
        settings.providers = vec![
            ProviderConfig {
                slow: Some(true),
                ..provider("yts", "yts")
            },
            ProviderConfig {
                disabled: true,
                ..provider("tpb", "tpb")
            },
            provider("rarbg", "rarbg"),
            provider("page-without-template", "magnet_page"),
            ProviderConfig {
                url_template: Some("https://torrents.example/search/{id}".to_string()),
                ..provider("page", "magnet_page")
            },
        ];

        let registry = ProviderLoader::load(&settings, &HttpClient::new().unwrap());

        assert_eq!(registry.names(), vec!["yts", "page"]);
        assert!(registry.get("yts").unwrap().is_slow());
        assert!(!registry.get("page").unwrap().is_slow());
    }
}
