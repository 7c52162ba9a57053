//! Query engines for the gallery and location APIs.
//!
//! Every operation is a synchronous read over a `SiteStore`; lookups
//! signal a missing id with `None`. The HTTP server and the CLI both
//! call these functions directly.

pub mod gallery;
pub mod geo;
pub mod hours;
pub mod location;

pub use gallery::{get_photo, list_categories, list_photos, search_photos};
pub use location::{get_location, list_locations};
