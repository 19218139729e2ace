#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Coordinate and bounding-box types.
//!
//! Every record placed on the map carries a [`Coordinates`] value. The wire
//! shape is `{ "lat": .., "lng": .. }`, matching what the report form posts.

use serde::{Deserialize, Serialize};

/// A WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl Coordinates {
    /// Creates a new coordinate pair.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns the position as a `[lng, lat]` pair, the order used by
    /// `GeoJSON` and the map camera.
    #[must_use]
    pub const fn lng_lat(self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

/// A geographic bounding box in WGS84 coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Western longitude boundary.
    pub west: f64,
    /// Southern latitude boundary.
    pub south: f64,
    /// Eastern longitude boundary.
    pub east: f64,
    /// Northern latitude boundary.
    pub north: f64,
}

impl BoundingBox {
    /// Creates a new bounding box from the given coordinates.
    #[must_use]
    pub const fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// Whether the point lies inside the box (edges inclusive).
    #[must_use]
    pub fn contains(&self, point: Coordinates) -> bool {
        (self.south..=self.north).contains(&point.lat)
            && (self.west..=self.east).contains(&point.lng)
    }
}

/// Plausible bounds for every station the dashboard displays: Delhi,
/// Haryana and Punjab together.
pub const SERVICE_AREA: BoundingBox = BoundingBox::new(73.0, 28.0, 78.5, 33.0);

/// Anything that can be placed on the map at a single point.
pub trait Located {
    /// The position of the record.
    fn location(&self) -> Coordinates;
}

impl Located for Coordinates {
    fn location(&self) -> Coordinates {
        *self
    }
}
