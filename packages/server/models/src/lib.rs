#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the air map server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the store row types so the API contract can evolve on its own.

use air_map_air_models::{
    CitizenReport, CitizenSensor, PollutionSource, ReportStatus, ReportType, SatelliteData,
    Severity, Station, TimeRange, TrafficData,
};
use air_map_database_models::ReportRow;
use air_map_geography_models::Coordinates;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

/// Body posted by the report form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSubmission {
    /// UI category label (e.g. `Waste & Burning`). Mapped to a
    /// [`ReportType`] on the server.
    pub category: String,
    /// Severity 1-5.
    pub severity: Severity,
    /// Optional free text.
    #[serde(default)]
    pub description: Option<String>,
    /// Pinned location.
    pub location: Coordinates,
}

/// A stored report as echoed back after submission or moderation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiStoredReport {
    /// Generated UUID.
    pub id: String,
    /// Mapped incident category.
    pub report_type: ReportType,
    /// Severity 1-5.
    pub severity: Severity,
    /// Free text.
    pub description: Option<String>,
    /// WKT `POINT(lng lat)`.
    pub location: String,
    /// Filing user.
    pub user_id: String,
    /// Moderation state.
    pub status: ReportStatus,
    /// Insert time.
    pub reported_at: DateTime<Utc>,
}

impl From<ReportRow> for ApiStoredReport {
    fn from(row: ReportRow) -> Self {
        Self {
            id: row.id,
            report_type: row.report_type,
            severity: row.severity,
            description: row.description,
            location: row.location,
            user_id: row.user_id,
            status: row.status,
            reported_at: row.reported_at,
        }
    }
}

/// `?range=` query shared by the data endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RangeQuery {
    /// Selected window. Defaults to live.
    #[serde(default)]
    pub range: TimeRange,
}

/// Query parameters for the sensors endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SensorsQuery {
    /// Selected window. Defaults to live.
    #[serde(default)]
    pub range: TimeRange,
    /// How many sensors to generate.
    pub count: Option<usize>,
}

/// Query parameters for the forecast endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastQuery {
    /// Value the forecast starts from.
    pub current: u32,
    /// Number of forecast steps.
    pub hours: Option<usize>,
}

/// Everything the dashboard page needs for one range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    /// Station readings.
    pub stations: Vec<Station>,
    /// Citizen sensor estimates.
    pub sensors: Vec<CitizenSensor>,
    /// Citizen reports.
    pub reports: Vec<CitizenReport>,
    /// Annotated pollution sources.
    pub sources: Vec<PollutionSource>,
    /// Mock satellite footprints.
    #[serde(default)]
    pub satellite: Vec<SatelliteData>,
    /// Mock traffic corridors.
    #[serde(default)]
    pub traffic: Vec<TrafficData>,
    /// Whether stations came from the live feed.
    pub is_live: bool,
}

/// Body of the moderation endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    /// Target state.
    pub status: ReportStatus,
}

/// Account role.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum UserRole {
    /// Files reports.
    #[default]
    Volunteer,
    /// Moderates reports.
    Official,
    /// Moderates reports and manages the deployment.
    Admin,
}

impl UserRole {
    /// Whether the role may verify or reject reports.
    #[must_use]
    pub const fn can_moderate(self) -> bool {
        matches!(self, Self::Official | Self::Admin)
    }
}

/// A signed-up user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// `user_<random>` identifier.
    pub id: String,
    /// Display name.
    pub full_name: String,
    /// Phone number used to sign in.
    pub phone: String,
    /// Role.
    pub role: UserRole,
    /// Optional email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Body of the sign-up endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    /// Phone number.
    pub phone: String,
    /// Display name.
    pub full_name: String,
    /// Requested role.
    #[serde(default)]
    pub role: UserRole,
    /// Optional email.
    #[serde(default)]
    pub email: Option<String>,
}

/// Body of the sign-in endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInRequest {
    /// Phone number used at sign-up.
    pub phone: String,
}

/// A successful sign-up or sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// Bearer token for later requests.
    pub token: String,
    /// The signed-in user.
    pub user: UserProfile,
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
}

impl ErrorResponse {
    /// Creates an error body.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
    /// Whether a live feed token is configured.
    pub live_feed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_parses_form_body() {
        let body = r#"{"category":"Waste & Burning","severity":3,"description":"smoke","location":{"lat":28.6,"lng":77.2}}"#;
        let parsed: ReportSubmission = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.category, "Waste & Burning");
        assert_eq!(parsed.severity.value(), 3);
        assert!((parsed.location.lng - 77.2).abs() < f64::EPSILON);
    }

    #[test]
    fn submission_rejects_out_of_range_severity() {
        let body = r#"{"category":"x","severity":9,"location":{"lat":0,"lng":0}}"#;
        assert!(serde_json::from_str::<ReportSubmission>(body).is_err());
    }

    #[test]
    fn dashboard_uses_is_live_key() {
        let json = serde_json::to_value(DashboardResponse::default()).unwrap();
        assert_eq!(json["isLive"], false);
    }

    #[test]
    fn only_officials_and_admins_moderate() {
        assert!(!UserRole::Volunteer.can_moderate());
        assert!(UserRole::Official.can_moderate());
        assert!(UserRole::Admin.can_moderate());
        assert_eq!(
            serde_json::from_str::<UserRole>(r#""OFFICIAL""#).unwrap(),
            UserRole::Official
        );
    }
}
