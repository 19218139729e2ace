#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geometry helpers for the air map.
//!
//! Great-circle distance and nearest-station lookup, random point sampling
//! used by the simulators, circle and line builders for the mock overlays,
//! WKT point encoding for the report store, and the embedded region presets
//! that drive camera fly-to and live-feed keywords.

pub mod distance;
pub mod nearest;
pub mod regions;
pub mod sampling;
pub mod shapes;
pub mod wkt;

pub use distance::haversine_km;
pub use nearest::{Nearest, nearest};
pub use regions::{REGION_PITCH, RegionPreset, all_regions, preset};
