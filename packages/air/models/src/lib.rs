#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Air-quality taxonomy types shared across the air map system.
//!
//! Defines the pollutants a station reports, the six AQI safety bands, the
//! discrete time-range selector, the supported regions, and the categories
//! used by citizen reports and pollution-source annotations, plus the value
//! records ([`Station`], [`CitizenReport`], ...) that flow through the map.

pub mod records;

pub use records::{
    CitizenReport, CitizenSensor, PollutionSource, SatelliteData, Station, TrafficData,
};

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A measured pollutant that the map can be colored by.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Pollutant {
    /// Fine particulate matter (≤ 2.5 µm).
    #[default]
    Pm25,
    /// Coarse particulate matter (≤ 10 µm).
    Pm10,
    /// Nitrogen dioxide.
    No2,
    /// Sulphur dioxide.
    So2,
    /// Carbon monoxide.
    Co,
}

impl Pollutant {
    /// Display label used in the command panel.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pm25 => "PM2.5",
            Self::Pm10 => "PM10",
            Self::No2 => "NO₂",
            Self::So2 => "SO₂",
            Self::Co => "CO",
        }
    }

    /// Color used to paint station and sensor circles for this pollutant.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Pm25 => "#ef4444",
            Self::Pm10 => "#f97316",
            Self::No2 => "#a855f7",
            Self::So2 => "#3b82f6",
            Self::Co => "#eab308",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Pm25, Self::Pm10, Self::No2, Self::So2, Self::Co]
    }
}

/// One of the six ordered AQI bands.
///
/// Each band's upper boundary is inclusive: an index of exactly 50 is
/// [`AqiBand::Good`], 51 is [`AqiBand::Moderate`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AqiBand {
    /// 0–50
    Good,
    /// 51–100
    Moderate,
    /// 101–150
    UnhealthyForSensitiveGroups,
    /// 151–200
    Unhealthy,
    /// 201–300
    VeryUnhealthy,
    /// Above 300
    Hazardous,
}

impl AqiBand {
    /// Classifies an AQI value into its band.
    #[must_use]
    pub const fn classify(aqi: u32) -> Self {
        match aqi {
            0..=50 => Self::Good,
            51..=100 => Self::Moderate,
            101..=150 => Self::UnhealthyForSensitiveGroups,
            151..=200 => Self::Unhealthy,
            201..=300 => Self::VeryUnhealthy,
            _ => Self::Hazardous,
        }
    }

    /// Human-readable band label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unhealthy",
            Self::Hazardous => "Hazardous",
        }
    }

    /// Display color for the band.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Good => "#10b981",
            Self::Moderate => "#eab308",
            Self::UnhealthyForSensitiveGroups => "#f97316",
            Self::Unhealthy => "#ef4444",
            Self::VeryUnhealthy => "#a855f7",
            Self::Hazardous => "#7f1d1d",
        }
    }

    /// Advisory message shown alongside the band.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Good => {
                "Air quality is satisfactory, and air pollution poses little or no risk."
            }
            Self::Moderate => {
                "Air quality is acceptable. However, there may be a risk for some people."
            }
            Self::UnhealthyForSensitiveGroups => {
                "Members of sensitive groups may experience health effects."
            }
            Self::Unhealthy => "Everyone may begin to experience health effects.",
            Self::VeryUnhealthy => {
                "Health warnings of emergency conditions. The entire population is more likely to be affected."
            }
            Self::Hazardous => {
                "Health alert: everyone may experience more serious health effects."
            }
        }
    }

    /// Whether the band is considered safe for the general public.
    #[must_use]
    pub const fn is_safe(self) -> bool {
        matches!(self, Self::Good | Self::Moderate)
    }

    /// Returns all variants of this enum, in ascending severity.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Good,
            Self::Moderate,
            Self::UnhealthyForSensitiveGroups,
            Self::Unhealthy,
            Self::VeryUnhealthy,
            Self::Hazardous,
        ]
    }
}

/// A classified AQI reading, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AqiStatus {
    /// The band the reading falls into.
    pub band: AqiBand,
    /// Band label.
    pub label: String,
    /// Display color.
    pub color: String,
    /// Advisory message.
    pub message: String,
    /// Whether the band is safe.
    pub is_safe: bool,
}

impl From<AqiBand> for AqiStatus {
    fn from(band: AqiBand) -> Self {
        Self {
            band,
            label: band.label().to_string(),
            color: band.color().to_string(),
            message: band.message().to_string(),
            is_safe: band.is_safe(),
        }
    }
}

/// Classifies an AQI value into a displayable [`AqiStatus`].
#[must_use]
pub fn aqi_status(aqi: u32) -> AqiStatus {
    AqiBand::classify(aqi).into()
}

/// Discrete time window selected in the command panel.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum TimeRange {
    /// Current readings.
    #[default]
    #[serde(rename = "live")]
    #[strum(serialize = "live")]
    Live,
    /// Last 24 hours.
    #[serde(rename = "24h")]
    #[strum(serialize = "24h")]
    Hours24,
    /// Last 7 days.
    #[serde(rename = "7d")]
    #[strum(serialize = "7d")]
    Days7,
    /// Last 30 days.
    #[serde(rename = "30d")]
    #[strum(serialize = "30d")]
    Days30,
}

impl TimeRange {
    /// Multiplicative discount applied to every live station value.
    #[must_use]
    pub const fn discount(self) -> f64 {
        match self {
            Self::Live => 1.0,
            Self::Hours24 => 0.9,
            Self::Days7 => 0.85,
            Self::Days30 => 0.75,
        }
    }

    /// Factor by which simulated report volume grows with the window length.
    #[must_use]
    pub const fn report_volume_factor(self) -> f64 {
        match self {
            Self::Live => 1.0,
            Self::Hours24 => 1.5,
            Self::Days7 => 3.0,
            Self::Days30 => 6.0,
        }
    }

    /// Length of the window in hours. Live covers the last four hours.
    #[must_use]
    pub const fn window_hours(self) -> i64 {
        match self {
            Self::Live => 4,
            Self::Hours24 => 24,
            Self::Days7 => 24 * 7,
            Self::Days30 => 24 * 30,
        }
    }

    /// Short label used in the command panel.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Live => "Live",
            Self::Hours24 => "24H",
            Self::Days7 => "7D",
            Self::Days30 => "30D",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Live, Self::Hours24, Self::Days7, Self::Days30]
    }
}

/// A region the dashboard can focus on.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Region {
    /// National Capital Territory of Delhi.
    #[default]
    Delhi,
    /// Haryana state.
    Haryana,
    /// Punjab state.
    Punjab,
}

impl Region {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Delhi, Self::Haryana, Self::Punjab]
    }
}

/// Authority that publishes a station's readings.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum StationSource {
    /// Central Pollution Control Board.
    Cpcb,
    /// System of Air Quality and Weather Forecasting and Research.
    Safar,
    /// Delhi Pollution Control Committee.
    Dpcc,
}

/// Backend incident category stored with every citizen report.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportType {
    /// Open burning of garbage, crop residue or fuel.
    GarbageBurning,
    /// Dust from construction or unpaved surfaces.
    ConstructionDust,
    /// Idling or gridlocked traffic.
    TrafficCongestion,
    /// Smoke from industrial stacks.
    IndustrialSmoke,
}

impl ReportType {
    /// Whether this report counts as an active fire.
    #[must_use]
    pub const fn is_burning(self) -> bool {
        matches!(self, Self::GarbageBurning)
    }

    /// Human-readable label used in popups.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::GarbageBurning => "Garbage Burning",
            Self::ConstructionDust => "Construction Dust",
            Self::TrafficCongestion => "Traffic Congestion",
            Self::IndustrialSmoke => "Industrial Smoke",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::GarbageBurning,
            Self::ConstructionDust,
            Self::TrafficCongestion,
            Self::IndustrialSmoke,
        ]
    }
}

/// Moderation state of a citizen report.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReportStatus {
    /// Awaiting moderation.
    #[default]
    Pending,
    /// Confirmed by a moderator.
    Verified,
    /// Dismissed by a moderator.
    Rejected,
}

impl ReportStatus {
    /// Whether a moderator may move a report from `self` to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Verified | Self::Rejected)
        )
    }
}

/// Severity of a citizen report, from 1 (mild) to 5 (severe).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Severity(u8);

impl Severity {
    /// Lowest severity.
    pub const MIN: Self = Self(1);
    /// Highest severity.
    pub const MAX: Self = Self(5);

    /// Creates a severity level from a numeric value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not in the range 1-5.
    pub const fn from_value(value: u8) -> Result<Self, InvalidSeverityError> {
        match value {
            1..=5 => Ok(Self(value)),
            _ => Err(InvalidSeverityError { value }),
        }
    }

    /// Creates a severity, clamping out-of-range values into 1-5.
    #[must_use]
    pub const fn clamped(value: u8) -> Self {
        match value {
            0 => Self::MIN,
            1..=5 => Self(value),
            _ => Self::MAX,
        }
    }

    /// Returns the numeric value of this severity level.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl Default for Severity {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<u8> for Severity {
    type Error = InvalidSeverityError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity.0
    }
}

/// Error returned when attempting to create a [`Severity`] from an invalid
/// numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSeverityError {
    /// The invalid severity value that was provided.
    pub value: u8,
}

impl std::fmt::Display for InvalidSeverityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid severity value {}: expected 1-5", self.value)
    }
}

impl std::error::Error for InvalidSeverityError {}

/// Category of a pollution source, as offered in the report form and the
/// source-annotation toggles.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum SourceCategory {
    /// Thermal plants, generators.
    #[serde(rename = "Power & Energy")]
    #[strum(serialize = "Power & Energy")]
    PowerEnergy,
    /// Factories and process industry.
    #[serde(rename = "Industrial Manufacturing")]
    #[strum(serialize = "Industrial Manufacturing")]
    IndustrialManufacturing,
    /// Brick kilns, cement and stone crushing.
    #[serde(rename = "Brick & Construction Materials")]
    #[strum(serialize = "Brick & Construction Materials")]
    BrickConstructionMaterials,
    /// Landfills and open waste burning.
    #[serde(rename = "Waste & Burning")]
    #[strum(serialize = "Waste & Burning")]
    WasteBurning,
    /// Building sites and road dust.
    #[serde(rename = "Construction & Urban Dust")]
    #[strum(serialize = "Construction & Urban Dust")]
    ConstructionUrbanDust,
    /// Vehicles and solid fuel use.
    #[serde(rename = "Fuel Combustion")]
    #[strum(serialize = "Fuel Combustion")]
    FuelCombustion,
    /// Stubble burning and agro-processing.
    #[serde(rename = "Agriculture-Linked")]
    #[strum(serialize = "Agriculture-Linked")]
    AgricultureLinked,
    /// Hospitals, campuses, public facilities.
    #[serde(rename = "Public & Institutional")]
    #[strum(serialize = "Public & Institutional")]
    PublicInstitutional,
}

impl SourceCategory {
    /// Marker color used for sources of this category.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::PowerEnergy => "#ef4444",
            Self::IndustrialManufacturing => "#f97316",
            Self::BrickConstructionMaterials => "#78350f",
            Self::WasteBurning => "#22c55e",
            Self::ConstructionUrbanDust => "#eab308",
            Self::FuelCombustion => "#dc2626",
            Self::AgricultureLinked => "#15803d",
            Self::PublicInstitutional => "#3b82f6",
        }
    }

    /// Sub-type labels that sources of this category are annotated with.
    #[must_use]
    pub const fn sub_types(self) -> &'static [&'static str] {
        match self {
            Self::PowerEnergy => &["Thermal Power Plant", "Diesel Generator Cluster"],
            Self::IndustrialManufacturing => &["Chemical Unit", "Steel Rolling Mill", "Dyeing Unit"],
            Self::BrickConstructionMaterials => &["Brick Kiln", "Stone Crusher", "Cement Plant"],
            Self::WasteBurning => &["Landfill Site", "Open Waste Burning"],
            Self::ConstructionUrbanDust => &["Construction Site", "Unpaved Road"],
            Self::FuelCombustion => &["Bus Depot", "Truck Terminal", "Fuel Station"],
            Self::AgricultureLinked => &["Stubble Burning Field", "Rice Mill"],
            Self::PublicInstitutional => &["Hospital Incinerator", "Crematorium"],
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::PowerEnergy,
            Self::IndustrialManufacturing,
            Self::BrickConstructionMaterials,
            Self::WasteBurning,
            Self::ConstructionUrbanDust,
            Self::FuelCombustion,
            Self::AgricultureLinked,
            Self::PublicInstitutional,
        ]
    }
}

/// What a satellite overlay polygon measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum SatelliteKind {
    /// Aerosol optical depth.
    Aod,
    /// Tropospheric nitrogen dioxide column.
    No2,
}

/// Congestion level tag of a traffic overlay line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CongestionLevel {
    /// Free-flowing.
    Low,
    /// Slow.
    Moderate,
    /// Stop-and-go.
    High,
    /// Gridlock.
    Severe,
}
