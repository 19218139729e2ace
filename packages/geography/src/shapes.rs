//! Builders for the mock overlay geometries.
//!
//! Positions are `[lng, lat]` pairs, the order `GeoJSON` expects.

use std::f64::consts::TAU;

use rand::Rng;

use crate::distance::{km_to_lat_degrees, km_to_lng_degrees};

/// Default number of segments in a circle ring.
pub const CIRCLE_SEGMENTS: usize = 32;

/// Approximates a circle of `radius_km` around `center` as a closed ring
/// with `segments + 1` positions (the first position is repeated last).
#[must_use]
pub fn circle_ring(center: [f64; 2], radius_km: f64, segments: usize) -> Vec<[f64; 2]> {
    let [lng, lat] = center;
    let dlat = km_to_lat_degrees(radius_km);
    let dlng = km_to_lng_degrees(radius_km, lat);

    (0..=segments)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let theta = (i % segments.max(1)) as f64 / segments.max(1) as f64 * TAU;
            [lng + dlng * theta.sin(), lat + dlat * theta.cos()]
        })
        .collect()
}

/// Builds a three-point line from `start` to `end` whose midpoint is nudged
/// by up to `jitter / 2` degrees on each axis.
pub fn jittered_line(
    rng: &mut impl Rng,
    start: [f64; 2],
    end: [f64; 2],
    jitter: f64,
) -> Vec<[f64; 2]> {
    let mid = [
        (start[0] + end[0]) / 2.0 + (rng.gen_range(0.0_f64..1.0) - 0.5) * jitter,
        (start[1] + end[1]) / 2.0 + (rng.gen_range(0.0_f64..1.0) - 0.5) * jitter,
    ];

    vec![start, mid, end]
}
