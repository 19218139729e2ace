//! Form category to stored incident type.

use air_map_air_models::ReportType;

/// Maps a report-form category label to the stored incident type.
///
/// Rules are checked in order and the first substring match wins, so
/// `Public & Institutional` lands on traffic and `Brick & Construction
/// Materials` on dust. Anything unmatched is industrial smoke.
#[must_use]
pub fn map_category(label: &str) -> ReportType {
    const RULES: &[(&[&str], ReportType)] = &[
        (&["Burning", "Agriculture", "Fuel"], ReportType::GarbageBurning),
        (&["Construction", "Brick", "Dust"], ReportType::ConstructionDust),
        (&["Traffic", "Public"], ReportType::TrafficCongestion),
    ];

    RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| label.contains(n)))
        .map_or(ReportType::IndustrialSmoke, |(_, report_type)| *report_type)
}
