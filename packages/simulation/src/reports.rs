//! Simulated citizen incident reports.

use air_map_air_models::{CitizenReport, ReportStatus, ReportType, Severity, TimeRange};
use air_map_geography::{RegionPreset, all_regions, sampling::square_jitter};
use air_map_geography_models::Coordinates;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;

/// Reports generated per page load before range scaling.
pub const DEFAULT_REPORT_COUNT: usize = 20;

/// Side of the square, in degrees, reports are jittered within around a
/// hotspot.
const REPORT_JITTER_DEG: f64 = 0.1;

/// Generates reports scattered around the region hotspots.
///
/// The number produced is `count` scaled by
/// [`TimeRange::report_volume_factor`], and timestamps are spread across
/// the range window ending now.
pub fn generate_reports(rng: &mut impl Rng, range: TimeRange, count: usize) -> Vec<CitizenReport> {
    let centers: Vec<Coordinates> = all_regions()
        .iter()
        .flat_map(RegionPreset::report_center_coordinates)
        .collect();

    let reports = reports_around(rng, &centers, range, scaled_count(count, range), Utc::now());
    log::debug!("Generated {} reports for range {range}", reports.len());
    reports
}

/// Generates exactly `count` reports around `centers`, timestamped within
/// `range` before `now`. Returns nothing if `centers` is empty.
pub fn reports_around(
    rng: &mut impl Rng,
    centers: &[Coordinates],
    range: TimeRange,
    count: usize,
    now: DateTime<Utc>,
) -> Vec<CitizenReport> {
    if centers.is_empty() {
        return Vec::new();
    }

    let types = ReportType::all();
    let window_secs = range.window_hours() * 3600;

    (0..count)
        .map(|i| {
            let center = centers[rng.gen_range(0..centers.len())];

            CitizenReport {
                id: format!("report-{}", i + 1),
                report_type: types[rng.gen_range(0..types.len())],
                severity: Severity::clamped(rng.gen_range(1..=5)),
                location: square_jitter(rng, center, REPORT_JITTER_DEG),
                timestamp: now - Duration::seconds(rng.gen_range(0..window_secs)),
                status: sample_status(rng),
                description: None,
            }
        })
        .collect()
}

/// 80% pending, 15% verified, 5% rejected.
fn sample_status(rng: &mut impl Rng) -> ReportStatus {
    let draw: f64 = rng.gen_range(0.0..1.0);
    if draw < 0.80 {
        ReportStatus::Pending
    } else if draw < 0.95 {
        ReportStatus::Verified
    } else {
        ReportStatus::Rejected
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn scaled_count(count: usize, range: TimeRange) -> usize {
    (count as f64 * range.report_volume_factor()).round() as usize
}
