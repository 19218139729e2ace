//! The static monitoring-station list.

use air_map_air_models::{Station, StationSource, TimeRange};
use air_map_geography_models::Coordinates;
use chrono::{DateTime, Utc};

struct BaseStation {
    id: &'static str,
    name: &'static str,
    lat: f64,
    lng: f64,
    aqi: u32,
    pm25: u32,
    pm10: u32,
    no2: u32,
    so2: u32,
    co: u32,
    source: StationSource,
}

#[rustfmt::skip]
const BASE_STATIONS: &[BaseStation] = &[
    BaseStation { id: "cpcb-001", name: "Anand Vihar", lat: 28.6469, lng: 77.3160, aqi: 450, pm25: 380, pm10: 450, no2: 85, so2: 22, co: 68, source: StationSource::Cpcb },
    BaseStation { id: "cpcb-002", name: "R.K. Puram", lat: 28.5632, lng: 77.1869, aqi: 320, pm25: 150, pm10: 220, no2: 64, so2: 15, co: 48, source: StationSource::Cpcb },
    BaseStation { id: "cpcb-003", name: "Punjabi Bagh", lat: 28.66197, lng: 77.12415, aqi: 380, pm25: 210, pm10: 310, no2: 72, so2: 18, co: 57, source: StationSource::Cpcb },
    BaseStation { id: "cpcb-004", name: "ITO", lat: 28.6285, lng: 77.2410, aqi: 410, pm25: 290, pm10: 390, no2: 95, so2: 20, co: 62, source: StationSource::Cpcb },
    BaseStation { id: "dpcc-001", name: "Mandir Marg", lat: 28.6364, lng: 77.1987, aqi: 290, pm25: 120, pm10: 200, no2: 48, so2: 12, co: 44, source: StationSource::Dpcc },
    BaseStation { id: "safar-001", name: "Lodhi Road", lat: 28.5918, lng: 77.2273, aqi: 265, pm25: 115, pm10: 185, no2: 41, so2: 11, co: 39, source: StationSource::Safar },
    BaseStation { id: "cpcb-101", name: "Gurugram Sector 51", lat: 28.4231, lng: 77.0673, aqi: 310, pm25: 170, pm10: 260, no2: 58, so2: 16, co: 47, source: StationSource::Cpcb },
    BaseStation { id: "cpcb-102", name: "Faridabad Sector 16A", lat: 28.4089, lng: 77.3178, aqi: 335, pm25: 190, pm10: 280, no2: 61, so2: 19, co: 50, source: StationSource::Cpcb },
    BaseStation { id: "cpcb-103", name: "Panipat Sector 18", lat: 29.3909, lng: 76.9635, aqi: 280, pm25: 140, pm10: 230, no2: 39, so2: 24, co: 42, source: StationSource::Cpcb },
    BaseStation { id: "cpcb-201", name: "Ludhiana Punjab Agricultural University", lat: 30.9010, lng: 75.8573, aqi: 240, pm25: 130, pm10: 210, no2: 33, so2: 14, co: 36, source: StationSource::Cpcb },
    BaseStation { id: "cpcb-202", name: "Amritsar Golden Temple", lat: 31.6200, lng: 74.8765, aqi: 215, pm25: 110, pm10: 190, no2: 29, so2: 10, co: 32, source: StationSource::Cpcb },
    BaseStation { id: "cpcb-203", name: "Patiala Model Town", lat: 30.3398, lng: 76.3869, aqi: 198, pm25: 95, pm10: 170, no2: 26, so2: 9, co: 30, source: StationSource::Cpcb },
];

/// The station list at live values, stamped with `now`.
#[must_use]
pub fn base_stations(now: DateTime<Utc>) -> Vec<Station> {
    BASE_STATIONS
        .iter()
        .map(|s| Station {
            id: s.id.to_string(),
            name: s.name.to_string(),
            location: Coordinates::new(s.lat, s.lng),
            aqi: s.aqi,
            pm25: s.pm25,
            pm10: s.pm10,
            no2: s.no2,
            so2: s.so2,
            co: s.co,
            source: s.source,
            last_updated: now,
        })
        .collect()
}

/// The station list scaled for `range`.
///
/// Every reading, including the overall index, becomes
/// `floor(live × range.discount())`.
#[must_use]
pub fn stations(range: TimeRange) -> Vec<Station> {
    stations_at(range, Utc::now())
}

/// Like [`stations`], with an explicit timestamp.
#[must_use]
pub fn stations_at(range: TimeRange, now: DateTime<Utc>) -> Vec<Station> {
    let discount = range.discount();

    base_stations(now)
        .into_iter()
        .map(|s| Station {
            aqi: scale(s.aqi, discount),
            pm25: scale(s.pm25, discount),
            pm10: scale(s.pm10, discount),
            no2: scale(s.no2, discount),
            so2: scale(s.so2, discount),
            co: scale(s.co, discount),
            ..s
        })
        .collect()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scale(value: u32, discount: f64) -> u32 {
    (f64::from(value) * discount).floor() as u32
}
