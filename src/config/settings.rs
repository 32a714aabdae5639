//! Settings structures for MagnetSearch-RS configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::warn;

/// Main settings structure, loaded from settings.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub search: SearchSettings,
    pub outgoing: OutgoingSettings,
    pub providers: Vec<ProviderConfig>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            general: GeneralSettings::default(),
            server: ServerSettings::default(),
            search: SearchSettings::default(),
            outgoing: OutgoingSettings::default(),
            providers: default_providers(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Couldn't read settings file {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Couldn't parse settings file {}", path.display()))
    }

    /// Parse settings from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (MAGNETSEARCH_* prefix)
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    fn merge_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("MAGNETSEARCH_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Some(val) = var("MAGNETSEARCH_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("MAGNETSEARCH_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Some(val) = var("MAGNETSEARCH_TIMEOUT") {
            if let Ok(secs) = val.parse() {
                self.search.timeout = secs;
            }
        }
        if let Some(val) = var("MAGNETSEARCH_SLOW_TIMEOUT") {
            if let Ok(secs) = val.parse() {
                self.search.slow_timeout = secs;
            }
        }
    }

    /// Reject values the service cannot run with
    pub fn validate(&self) -> Result<()> {
        seconds("search.timeout", self.search.timeout)?;
        seconds("search.slow_timeout", self.search.slow_timeout)?;
        self.outgoing.request_timeout()?;
        Ok(())
    }

    /// Get all enabled providers
    pub fn enabled_providers(&self) -> Vec<&ProviderConfig> {
        self.providers.iter().filter(|p| !p.disabled).collect()
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
    /// Instance name reported by the health endpoint
    pub instance_name: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            instance_name: "MagnetSearch".to_string(),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

/// Search behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Per-provider timeout in seconds
    pub timeout: f64,
    /// Timeout in seconds for providers flagged as slow
    pub slow_timeout: f64,
    /// Trackers appended to magnet URLs built by providers
    pub trackers: Vec<String>,
}

impl SearchSettings {
    /// Budget for regular providers. Unusable values fall back to the default.
    pub fn timeout(&self) -> Duration {
        seconds("search.timeout", self.timeout).unwrap_or_else(|e| {
            warn!("{:#}, using {}s", e, crate::DEFAULT_TIMEOUT);
            Duration::from_secs(crate::DEFAULT_TIMEOUT)
        })
    }

    /// Budget for slow providers. Unusable values fall back to the default.
    pub fn slow_timeout(&self) -> Duration {
        seconds("search.slow_timeout", self.slow_timeout).unwrap_or_else(|e| {
            warn!("{:#}, using {}s", e, crate::SLOW_PROVIDER_TIMEOUT);
            Duration::from_secs(crate::SLOW_PROVIDER_TIMEOUT)
        })
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            timeout: crate::DEFAULT_TIMEOUT as f64,
            slow_timeout: crate::SLOW_PROVIDER_TIMEOUT as f64,
            trackers: default_trackers(),
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// HTTP request timeout in seconds
    pub request_timeout: f64,
    /// User agent sent to providers
    pub user_agent: String,
    /// Proxy settings
    pub proxies: ProxySettings,
}

impl OutgoingSettings {
    pub fn request_timeout(&self) -> Result<Duration> {
        seconds("outgoing.request_timeout", self.request_timeout)
    }
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 10.0,
            user_agent: format!("magnetsearch-rs/{}", crate::VERSION),
            proxies: ProxySettings::default(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Individual provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Provider name (unique identifier)
    pub name: String,
    /// Provider implementation to use ("yts", "tpb", "magnet_page")
    pub kind: String,
    /// Base URL override, e.g. a reverse proxy in front of the site
    pub base_url: Option<String>,
    /// Page URL with an `{id}` placeholder (magnet_page only)
    pub url_template: Option<String>,
    /// Use the short slow-provider timeout. Defaults to the implementation's own flag.
    pub slow: Option<bool>,
    /// Whether provider is disabled
    pub disabled: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: String::new(),
            base_url: None,
            url_template: None,
            slow: None,
            disabled: false,
        }
    }
}

/// Convert a seconds value from the settings, rejecting NaN, infinite,
/// negative and out of range numbers
fn seconds(field: &str, secs: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(secs)
        .with_context(|| format!("Invalid {}: {} is not a usable number of seconds", field, secs))
}

fn default_trackers() -> Vec<String> {
    [
        "udp://tracker.opentrackr.org:1337/announce",
        "udp://open.demonii.com:1337/announce",
        "udp://open.stealth.si:80/announce",
        "udp://tracker.torrent.eu.org:451/announce",
        "udp://exodus.desync.com:6969/announce",
    ]
    .iter()
    .map(|t| t.to_string())
    .collect()
}

/// Default provider configurations
fn default_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig {
            name: "yts".to_string(),
            kind: "yts".to_string(),
            ..Default::default()
        },
        ProviderConfig {
            name: "tpb".to_string(),
            kind: "tpb".to_string(),
            ..Default::default()
        },
    ]
}
