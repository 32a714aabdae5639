//! Result types and deduplication
//!
//! This module defines the torrent result structure returned by providers
//! and the merge step applied to the combined output of all providers.

mod dedup;
mod types;

pub use dedup::dedup_by_info_hash;
pub use types::*;
