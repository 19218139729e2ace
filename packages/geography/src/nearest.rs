//! Nearest-record lookup by linear scan.

use air_map_geography_models::{Coordinates, Located};

use crate::distance::haversine_km;

/// The closest record to a query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest<'a, T> {
    /// The winning record.
    pub item: &'a T,
    /// Great-circle distance to it in kilometres.
    pub distance_km: f64,
}

/// Returns the record closest to `point`, or `None` when `items` is empty.
///
/// Every record is visited once. On an exact tie the first record in
/// iteration order wins.
#[must_use]
pub fn nearest<T: Located>(point: Coordinates, items: &[T]) -> Option<Nearest<'_, T>> {
    let mut best: Option<Nearest<'_, T>> = None;

    for item in items {
        let distance_km = haversine_km(point, item.location());
        match best {
            Some(ref current) if current.distance_km <= distance_km => {}
            _ => best = Some(Nearest { item, distance_km }),
        }
    }

    best
}
