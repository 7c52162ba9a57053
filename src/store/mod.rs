//! Site data storage.
//!
//! Gallery and location collections are process-wide and read-only.
//! They are loaded once at startup, either from the built-in seed or
//! from a JSON data file, and shared behind the `SiteStore` trait.

mod backend;
mod memory;
mod seed;

pub use backend::{open_store, SiteStore};
pub use memory::{MemoryStore, SiteData};
