//! Random point placement for the simulators.
//!
//! Offsets are applied directly in degrees, which is accurate enough at the
//! few-kilometre scales the generators use.

use std::f64::consts::TAU;

use air_map_geography_models::Coordinates;
use rand::Rng;

/// Metres per degree used by the disk sampler.
const METRES_PER_DEGREE: f64 = 111_300.0;

/// Samples a point uniformly by area within `radius_km` of `center`.
///
/// The radius is scaled by the square root of a uniform draw so points do
/// not bunch up at the centre.
pub fn point_in_disk(rng: &mut impl Rng, center: Coordinates, radius_km: f64) -> Coordinates {
    let r = radius_km * 1000.0 / METRES_PER_DEGREE;
    let w = r * rng.gen_range(0.0_f64..1.0).sqrt();
    let t = TAU * rng.gen_range(0.0_f64..1.0);

    Coordinates::new(center.lat + w * t.cos(), center.lng + w * t.sin())
}

/// Samples a point inside the axis-aligned square of side `extent_deg`
/// centred on `center`.
pub fn square_jitter(rng: &mut impl Rng, center: Coordinates, extent_deg: f64) -> Coordinates {
    let dlat = (rng.gen_range(0.0_f64..1.0) - 0.5) * extent_deg;
    let dlng = (rng.gen_range(0.0_f64..1.0) - 0.5) * extent_deg;

    Coordinates::new(center.lat + dlat, center.lng + dlng)
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng as _, rngs::StdRng};

    use super::*;
    use crate::distance::haversine_km;

    #[test]
    fn disk_points_stay_within_radius() {
        let mut rng = StdRng::seed_from_u64(7);
        let center = Coordinates::new(28.6139, 77.2090);

        for _ in 0..1000 {
            let p = point_in_disk(&mut rng, center, 3.0);
            // Offsets are applied in raw degrees, so longitude stretches a
            // little at this latitude.
            assert!(haversine_km(center, p) <= 3.0 * 1.2, "{p:?}");
        }
    }

    #[test]
    fn disk_sampling_is_not_center_heavy() {
        let mut rng = StdRng::seed_from_u64(11);
        let center = Coordinates::new(28.6, 77.2);
        let samples = 4000;
        let inner = (0..samples)
            .map(|_| point_in_disk(&mut rng, center, 3.0))
            .filter(|p| {
                let dlat = p.lat - center.lat;
                let dlng = p.lng - center.lng;
                let r = 3.0 * 1000.0 / METRES_PER_DEGREE;
                (dlat * dlat + dlng * dlng).sqrt() < r / 2.0
            })
            .count();

        // A uniform disk puts a quarter of its area inside half the radius.
        #[allow(clippy::cast_precision_loss)]
        let share = inner as f64 / f64::from(samples);
        assert!((0.2..0.3).contains(&share), "inner share {share}");
    }

    #[test]
    fn square_jitter_is_bounded() {
        let mut rng = StdRng::seed_from_u64(3);
        let center = Coordinates::new(28.6, 77.2);

        for _ in 0..500 {
            let p = square_jitter(&mut rng, center, 0.1);
            assert!((p.lat - center.lat).abs() <= 0.05);
            assert!((p.lng - center.lng).abs() <= 0.05);
        }
    }
}
