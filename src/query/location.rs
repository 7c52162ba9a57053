//! Location queries: filtered listing with distance and open status,
//! and lookup by id.

use crate::clock::Clock;
use crate::models::{Location, LocationListQuery, LocationSummary};
use crate::query::geo::GeoPoint;
use crate::query::hours::is_open_at;
use crate::store::SiteStore;

/// Locations whose address matches the region and district filters.
///
/// Each supplied filter is a case-insensitive substring test on the
/// address and all of them must match. `is_open` is evaluated at
/// `clock.now()`. When both caller coordinates are supplied every item
/// carries its distance and the list is ordered nearest first;
/// otherwise storage order is kept and no distance is attached.
pub fn list_locations(
    store: &dyn SiteStore,
    clock: &dyn Clock,
    query: &LocationListQuery,
) -> Vec<LocationSummary> {
    let now = clock.now();

    let needles: Vec<String> = [query.region.as_deref(), query.district.as_deref()]
        .into_iter()
        .flatten()
        .filter(|needle| !needle.is_empty())
        .map(str::to_lowercase)
        .collect();

    let origin = match (query.latitude, query.longitude) {
        (Some(latitude), Some(longitude)) => Some(GeoPoint::new(latitude, longitude)),
        _ => None,
    };

    let mut items: Vec<LocationSummary> = store
        .locations()
        .iter()
        .filter(|location| {
            let address = location.address.to_lowercase();
            needles.iter().all(|needle| address.contains(needle.as_str()))
        })
        .map(|location| LocationSummary {
            id: location.id,
            name: location.name.clone(),
            address: location.address.clone(),
            latitude: location.latitude,
            longitude: location.longitude,
            is_open: is_open_at(&location.hours, now),
            distance: origin.map(|origin| {
                origin.distance_km(&GeoPoint::new(location.latitude, location.longitude))
            }),
        })
        .collect();

    if origin.is_some() {
        items.sort_by(|a, b| {
            let a = a.distance.unwrap_or(0.0);
            let b = b.distance.unwrap_or(0.0);
            a.total_cmp(&b)
        });
    }

    items
}

/// Exact id lookup.
pub fn get_location(store: &dyn SiteStore, id: u32) -> Option<Location> {
    store
        .locations()
        .iter()
        .find(|location| location.id == id)
        .cloned()
}
