#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Row types for the report store.
//!
//! These mirror the `citizen_reports` table as stored. They are distinct
//! from the [`CitizenReport`](air_map_air_models::CitizenReport) records the
//! map displays and from the API request types in `air_map_server_models`.

use air_map_air_models::{ReportStatus, ReportType, Severity};
use air_map_geography_models::Coordinates;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default number of rows returned by a recent-reports query.
pub const RECENT_REPORTS_LIMIT: u32 = 50;

/// A report about to be inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReport {
    /// Incident category after mapping from the form label.
    pub report_type: ReportType,
    /// Reported severity.
    pub severity: Severity,
    /// Optional free text.
    pub description: Option<String>,
    /// Where the incident was observed.
    pub location: Coordinates,
    /// Session user who filed it.
    pub user_id: String,
}

/// A `citizen_reports` row as retrieved from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Primary key (UUID v4).
    pub id: String,
    /// Incident category.
    pub report_type: ReportType,
    /// Reported severity.
    pub severity: Severity,
    /// Optional free text.
    pub description: Option<String>,
    /// Location as WKT `POINT(lng lat)`.
    pub location: String,
    /// Session user who filed it.
    pub user_id: String,
    /// Moderation state.
    pub status: ReportStatus,
    /// Insert time.
    pub reported_at: DateTime<Utc>,
}
