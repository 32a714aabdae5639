//! Torrent search providers
//!
//! Defines the MagnetSearcher trait and provides a registry for all providers.

mod loader;
mod quality;
mod registry;
mod traits;

// Provider implementations
pub mod magnet_page;
pub mod tpb;
pub mod yts;

#[cfg(test)]
pub(crate) mod mock;

pub use loader::ProviderLoader;
pub use quality::quality_from_name;
pub use registry::ProviderRegistry;
pub use traits::*;

use crate::network::replace_url;

/// Swap the canonical site base of `url` for a configured one, if any
fn rebased(url: String, base_url: Option<&str>) -> anyhow::Result<String> {
    match base_url {
        Some(base) => Ok(replace_url(&url, base)?),
        None => Ok(url),
    }
}
