//! Citizen sensors estimated from nearby stations.

use air_map_air_models::{CitizenSensor, Station, TimeRange};
use air_map_geography::sampling::point_in_disk;
use chrono::Utc;
use rand::Rng;

use crate::stations::stations;

/// Sensors generated per page load.
pub const DEFAULT_SENSOR_COUNT: usize = 50;

/// Sensors are placed within this distance of their base station.
const SENSOR_RADIUS_KM: f64 = 3.0;

/// Generates `count` sensors around the stations scaled for `range`.
pub fn generate_sensors(rng: &mut impl Rng, range: TimeRange, count: usize) -> Vec<CitizenSensor> {
    let base = stations(range);
    let sensors = sensors_from(rng, &base, count);
    log::debug!("Generated {} sensors for range {range}", sensors.len());
    sensors
}

/// Generates `count` sensors, each derived from a uniformly sampled station
/// in `base`. Returns nothing if `base` is empty.
pub fn sensors_from(rng: &mut impl Rng, base: &[Station], count: usize) -> Vec<CitizenSensor> {
    if base.is_empty() {
        return Vec::new();
    }

    let now = Utc::now();

    (0..count)
        .map(|i| {
            let station = &base[rng.gen_range(0..base.len())];
            let location = point_in_disk(rng, station.location, SENSOR_RADIUS_KM);

            CitizenSensor {
                id: format!("sensor-{}", i + 1),
                location,
                pm25: perturb(rng, station.pm25),
                pm10: perturb(rng, station.pm10),
                confidence: round_to(rng.gen_range(0.7..=1.0), 2),
                last_updated: now,
            }
        })
        .collect()
}

/// Applies ±20% multiplicative noise and a [-10, 40) additive bias, then
/// clamps at zero.
fn perturb(rng: &mut impl Rng, value: u32) -> f64 {
    let noise = rng.gen_range(-0.2..0.2);
    let bias = rng.gen_range(-10.0..40.0);
    round_to(f64::from(value).mul_add(1.0 + noise, bias), 1).max(0.0)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}
