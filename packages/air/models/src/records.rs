//! Value records passed through the dashboard.
//!
//! None of these are mutated after construction. The map view re-syncs
//! them wholesale whenever the page loader hands over a new set.

use air_map_geography_models::{Coordinates, Located};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    CongestionLevel, Pollutant, ReportStatus, ReportType, SatelliteKind, Severity, SourceCategory,
    StationSource,
};

/// An official monitoring station reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    /// Stable identifier (e.g. `cpcb-001`, `waqi-1234`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Station position.
    pub location: Coordinates,
    /// Overall air quality index.
    pub aqi: u32,
    /// PM2.5 concentration.
    pub pm25: u32,
    /// PM10 concentration.
    pub pm10: u32,
    /// Nitrogen dioxide.
    pub no2: u32,
    /// Sulphur dioxide.
    pub so2: u32,
    /// Carbon monoxide.
    pub co: u32,
    /// Publishing authority.
    pub source: StationSource,
    /// When the reading was taken.
    pub last_updated: DateTime<Utc>,
}

impl Station {
    /// Returns the measured value for a pollutant.
    #[must_use]
    pub const fn pollutant(&self, pollutant: Pollutant) -> u32 {
        match pollutant {
            Pollutant::Pm25 => self.pm25,
            Pollutant::Pm10 => self.pm10,
            Pollutant::No2 => self.no2,
            Pollutant::So2 => self.so2,
            Pollutant::Co => self.co,
        }
    }
}

impl Located for Station {
    fn location(&self) -> Coordinates {
        self.location
    }
}

/// A low-cost citizen sensor whose values are estimated from a nearby
/// station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitizenSensor {
    /// Stable identifier (e.g. `sensor-7`).
    pub id: String,
    /// Sensor position.
    pub location: Coordinates,
    /// Estimated PM2.5.
    pub pm25: f64,
    /// Estimated PM10.
    pub pm10: f64,
    /// Confidence in the estimate, 0-1.
    pub confidence: f64,
    /// When the estimate was produced.
    pub last_updated: DateTime<Utc>,
}

impl Located for CitizenSensor {
    fn location(&self) -> Coordinates {
        self.location
    }
}

/// A crowd-sourced pollution incident report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitizenReport {
    /// Report identifier.
    pub id: String,
    /// Backend incident category.
    #[serde(rename = "type")]
    pub report_type: ReportType,
    /// Reported severity.
    pub severity: Severity,
    /// Where the incident was observed.
    pub location: Coordinates,
    /// When the report was filed.
    pub timestamp: DateTime<Utc>,
    /// Moderation state.
    pub status: ReportStatus,
    /// Free-text description, if the reporter gave one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Located for CitizenReport {
    fn location(&self) -> Coordinates {
        self.location
    }
}

/// A static point-of-interest annotated on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollutionSource {
    /// Identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Category toggle this source belongs to.
    pub category: SourceCategory,
    /// Finer-grained label within the category.
    pub sub_type: String,
    /// Position.
    pub location: Coordinates,
}

impl Located for PollutionSource {
    fn location(&self) -> Coordinates {
        self.location
    }
}

/// A mock satellite retrieval footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SatelliteData {
    /// Identifier.
    pub id: String,
    /// Retrieved quantity.
    #[serde(rename = "type")]
    pub kind: SatelliteKind,
    /// Closed outer ring as `[lng, lat]` pairs.
    pub ring: Vec<[f64; 2]>,
    /// Intensity in 0-1.
    pub value: f64,
    /// Retrieval time.
    pub timestamp: DateTime<Utc>,
}

/// A mock traffic corridor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficData {
    /// Identifier.
    pub id: String,
    /// Corridor path as `[lng, lat]` pairs.
    pub path: Vec<[f64; 2]>,
    /// Congestion tag.
    pub congestion_level: CongestionLevel,
    /// Average speed in km/h.
    pub speed: u32,
}
