//! Store abstraction shared by the query engines.

use std::path::Path;

use anyhow::Result;

use crate::models::{Category, Location, Photo};
use crate::store::MemoryStore;

/// Read-only access to the site's collections, in storage order.
pub trait SiteStore: Send + Sync {
    /// All gallery categories.
    fn categories(&self) -> &[Category];

    /// All photos.
    fn photos(&self) -> &[Photo];

    /// All restaurant locations.
    fn locations(&self) -> &[Location];
}

/// Open the store used by the CLI and server.
///
/// With no data file the built-in seed collections are used; otherwise
/// the JSON file at `data_path` replaces them entirely.
pub fn open_store(data_path: Option<&Path>) -> Result<MemoryStore> {
    match data_path {
        Some(path) => MemoryStore::from_json_file(path),
        None => MemoryStore::seeded(),
    }
}
