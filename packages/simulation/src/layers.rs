//! Mock satellite and traffic overlays.
//!
//! These stand in for real retrieval and traffic feeds. The satellite
//! footprints are fixed circles; the traffic corridors get a little
//! midpoint jitter on every call.

use air_map_air_models::{CongestionLevel, SatelliteData, SatelliteKind, TrafficData};
use air_map_geography::shapes::{CIRCLE_SEGMENTS, circle_ring, jittered_line};
use chrono::Utc;
use rand::Rng;

/// Midpoint jitter, in degrees, of the traffic corridors.
const TRAFFIC_JITTER_DEG: f64 = 0.005;

struct Footprint {
    kind: SatelliteKind,
    center: [f64; 2],
    radius_km: f64,
    value: f64,
}

const FOOTPRINTS: &[Footprint] = &[
    // Punjab stubble-burning plume
    Footprint {
        kind: SatelliteKind::Aod,
        center: [75.8573, 30.9000],
        radius_km: 50.0,
        value: 0.9,
    },
    // Haryana industrial plume
    Footprint {
        kind: SatelliteKind::No2,
        center: [77.0266, 29.0000],
        radius_km: 30.0,
        value: 0.7,
    },
    // Delhi urban smog
    Footprint {
        kind: SatelliteKind::Aod,
        center: [77.2090, 28.6139],
        radius_km: 15.0,
        value: 0.5,
    },
];

struct Corridor {
    start: [f64; 2],
    end: [f64; 2],
    congestion: CongestionLevel,
    speed: u32,
}

const CORRIDORS: &[Corridor] = &[
    // Ring Road
    Corridor {
        start: [77.2100, 28.5700],
        end: [77.2300, 28.5800],
        congestion: CongestionLevel::Severe,
        speed: 10,
    },
    // Outer Ring Road
    Corridor {
        start: [77.1800, 28.5500],
        end: [77.1900, 28.5600],
        congestion: CongestionLevel::High,
        speed: 25,
    },
    // Connaught Place inner circle
    Corridor {
        start: [77.2150, 28.6310],
        end: [77.2180, 28.6320],
        congestion: CongestionLevel::Moderate,
        speed: 40,
    },
];

/// The satellite retrieval footprints.
#[must_use]
pub fn satellite_layers() -> Vec<SatelliteData> {
    let now = Utc::now();

    FOOTPRINTS
        .iter()
        .enumerate()
        .map(|(i, f)| SatelliteData {
            id: format!("sat-{}", i + 1),
            kind: f.kind,
            ring: circle_ring(f.center, f.radius_km, CIRCLE_SEGMENTS),
            value: f.value,
            timestamp: now,
        })
        .collect()
}

/// The traffic corridors.
pub fn traffic_layers(rng: &mut impl Rng) -> Vec<TrafficData> {
    CORRIDORS
        .iter()
        .enumerate()
        .map(|(i, c)| TrafficData {
            id: format!("tr-{}", i + 1),
            path: jittered_line(rng, c.start, c.end, TRAFFIC_JITTER_DEG),
            congestion_level: c.congestion,
            speed: c.speed,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng as _, rngs::StdRng};

    use super::*;

    #[test]
    fn satellite_footprints_are_closed_rings_with_unit_intensity() {
        let layers = satellite_layers();
        assert_eq!(layers.len(), 3);
        assert_eq!(layers[0].kind, SatelliteKind::Aod);
        assert_eq!(layers[1].kind, SatelliteKind::No2);

        for layer in &layers {
            assert!((0.0..=1.0).contains(&layer.value));
            assert_eq!(layer.ring.first(), layer.ring.last());
        }
    }

    #[test]
    fn traffic_corridors_keep_order_and_speed() {
        let mut rng = StdRng::seed_from_u64(10);
        let layers = traffic_layers(&mut rng);

        let levels: Vec<CongestionLevel> = layers.iter().map(|t| t.congestion_level).collect();
        assert_eq!(
            levels,
            vec![
                CongestionLevel::Severe,
                CongestionLevel::High,
                CongestionLevel::Moderate
            ]
        );
        assert_eq!(layers[0].speed, 10);
        assert!(layers.iter().all(|t| t.path.len() == 3));
    }
}
