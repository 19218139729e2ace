#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Plausible but fabricated data for the dashboard.
//!
//! Stations come from a fixed list scaled by the selected [`TimeRange`];
//! citizen sensors, incident reports and pollution sources are drawn
//! around that list and the region hotspots. Every randomised generator
//! takes `&mut impl Rng` so callers pick the entropy source; production
//! code passes [`rand::thread_rng`], tests pass a seeded `StdRng`.
//!
//! [`TimeRange`]: air_map_air_models::TimeRange

pub mod layers;
pub mod reports;
pub mod sensors;
pub mod sources;
pub mod stations;

pub use layers::{satellite_layers, traffic_layers};
pub use reports::{DEFAULT_REPORT_COUNT, generate_reports};
pub use sensors::{DEFAULT_SENSOR_COUNT, generate_sensors, sensors_from};
pub use sources::generate_pollution_sources;
pub use stations::{base_stations, stations, stations_at};
