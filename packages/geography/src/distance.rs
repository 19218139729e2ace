//! Great-circle distance.

use air_map_geography_models::Coordinates;
use geo::{Distance as _, Haversine, Point};

/// Kilometres per degree of latitude, used for the small-offset
/// approximations in the samplers and shape builders.
pub const KM_PER_DEGREE: f64 = 111.32;

/// Haversine distance between two points in kilometres.
#[must_use]
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    Haversine.distance(to_point(a), to_point(b)) / 1000.0
}

/// Converts a north-south distance to degrees of latitude.
#[must_use]
pub fn km_to_lat_degrees(km: f64) -> f64 {
    km / KM_PER_DEGREE
}

/// Converts an east-west distance at the given latitude to degrees of
/// longitude.
#[must_use]
pub fn km_to_lng_degrees(km: f64, lat: f64) -> f64 {
    km / (KM_PER_DEGREE * lat.to_radians().cos())
}

fn to_point(coords: Coordinates) -> Point<f64> {
    Point::new(coords.lng, coords.lat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_points_are_zero_apart() {
        let p = Coordinates::new(28.6139, 77.2090);
        assert!(haversine_km(p, p).abs() < f64::EPSILON);
    }

    #[test]
    fn delhi_to_chandigarh_is_about_240km() {
        let delhi = Coordinates::new(28.6139, 77.2090);
        let chandigarh = Coordinates::new(30.7333, 76.7794);
        let d = haversine_km(delhi, chandigarh);
        assert!((230.0..250.0).contains(&d), "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Coordinates::new(28.6469, 77.3160);
        let b = Coordinates::new(28.5632, 77.1869);
        assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
    }

    #[test]
    fn longitude_degrees_widen_away_from_equator() {
        assert!((km_to_lat_degrees(KM_PER_DEGREE) - 1.0).abs() < 1e-12);
        assert!(km_to_lng_degrees(10.0, 30.0) > km_to_lng_degrees(10.0, 0.0));
    }
}
