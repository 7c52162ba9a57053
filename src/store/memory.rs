//! In-memory store.
//!
//! Collections are loaded once, validated, and never mutated
//! afterwards. The data file format mirrors the API's JSON shapes:
//!
//! ```json
//! { "categories": [...], "photos": [...], "locations": [...] }
//! ```

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::{Category, Location, Photo};
use crate::store::backend::SiteStore;
use crate::store::seed;

/// Raw collections as read from a data file or the built-in seed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteData {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub locations: Vec<Location>,
}

/// Immutable, validated collections held in memory.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    categories: Vec<Category>,
    photos: Vec<Photo>,
    locations: Vec<Location>,
}

impl MemoryStore {
    /// Build a store from raw collections, rejecting data that breaks
    /// the model invariants.
    pub fn new(data: SiteData) -> Result<Self> {
        validate(&data)?;

        tracing::debug!(
            categories = data.categories.len(),
            photos = data.photos.len(),
            locations = data.locations.len(),
            "loaded site data"
        );

        Ok(Self {
            categories: data.categories,
            photos: data.photos,
            locations: data.locations,
        })
    }

    /// Store backed by the built-in seed collections.
    pub fn seeded() -> Result<Self> {
        Self::new(seed::site_data())
    }

    /// Load a JSON data file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open data file at {}", path.display()))?;
        let data: SiteData = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse data file at {}", path.display()))?;

        Self::new(data).with_context(|| format!("invalid data file at {}", path.display()))
    }
}

impl SiteStore for MemoryStore {
    fn categories(&self) -> &[Category] {
        &self.categories
    }

    fn photos(&self) -> &[Photo] {
        &self.photos
    }

    fn locations(&self) -> &[Location] {
        &self.locations
    }
}

fn validate(data: &SiteData) -> Result<()> {
    let mut category_names: HashMap<u32, &str> = HashMap::new();
    for category in &data.categories {
        if category_names
            .insert(category.id, category.name.as_str())
            .is_some()
        {
            bail!("duplicate category id {}", category.id);
        }
    }

    let mut photo_ids = HashSet::new();
    for photo in &data.photos {
        if !photo_ids.insert(photo.id) {
            bail!("duplicate photo id {}", photo.id);
        }

        match category_names.get(&photo.category_id) {
            None => bail!(
                "photo {} references unknown category {}",
                photo.id,
                photo.category_id
            ),
            Some(name) if *name != photo.category_name => bail!(
                "photo {} has category name {:?} but category {} is named {:?}",
                photo.id,
                photo.category_name,
                photo.category_id,
                name
            ),
            Some(_) => {}
        }
    }

    let mut location_ids = HashSet::new();
    for location in &data.locations {
        if !location_ids.insert(location.id) {
            bail!("duplicate location id {}", location.id);
        }
        if !(-90.0..=90.0).contains(&location.latitude) {
            bail!(
                "location {} has latitude {} outside [-90, 90]",
                location.id,
                location.latitude
            );
        }
        if !(-180.0..=180.0).contains(&location.longitude) {
            bail!(
                "location {} has longitude {} outside [-180, 180]",
                location.id,
                location.longitude
            );
        }
    }

    Ok(())
}
