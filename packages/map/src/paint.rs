//! Paint values shared by the overlay layers.

use air_map_air_models::Pollutant;
use serde_json::{Value, json};

/// Fire-mode alert color for reports.
pub const ALERT_COLOR: &str = "#dc2626";

/// Default color for unclustered reports.
pub const REPORT_COLOR: &str = "#eab308";

/// Color of the pin dropped at a captured report location.
pub const PIN_COLOR: &str = "#ec4899";

/// Stroke color around station and sensor circles.
pub const STROKE_COLOR: &str = "#ffffff";

/// Station and sensor fill for the selected pollutant.
#[must_use]
pub fn pollutant_color(pollutant: Pollutant) -> Value {
    Value::from(pollutant.color())
}

/// Cluster circle color: a count-stepped ramp, or flat red in fire mode.
#[must_use]
pub fn report_cluster_color(fire_mode: bool) -> Value {
    if fire_mode {
        Value::from(ALERT_COLOR)
    } else {
        json!(["step", ["get", "point_count"], "#eab308", 10, "#ca8a04", 30, "#854d0e"])
    }
}

/// Cluster circle radius stepped by count.
#[must_use]
pub fn report_cluster_radius() -> Value {
    json!(["step", ["get", "point_count"], 20, 100, 30, 750, 40])
}

/// Single report circle color.
#[must_use]
pub fn report_point_color(fire_mode: bool) -> Value {
    Value::from(if fire_mode { ALERT_COLOR } else { REPORT_COLOR })
}

/// Satellite polygons colored by retrieved quantity.
#[must_use]
pub fn satellite_fill_color() -> Value {
    json!(["match", ["get", "type"], "AOD", "#a855f7", "NO2", "#f97316", "#888888"])
}

/// Satellite polygon opacity follows intensity.
#[must_use]
pub fn satellite_fill_opacity() -> Value {
    json!(["get", "value"])
}

/// Traffic lines colored by congestion.
#[must_use]
pub fn traffic_line_color() -> Value {
    json!([
        "match",
        ["get", "congestionLevel"],
        "low",
        "#22c55e",
        "moderate",
        "#eab308",
        "high",
        "#f97316",
        "severe",
        "#dc2626",
        "#888888"
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fire_mode_flattens_report_colors() {
        assert_eq!(report_cluster_color(true), ALERT_COLOR);
        assert_eq!(report_point_color(true), ALERT_COLOR);
        assert!(report_cluster_color(false).is_array());
        assert_eq!(report_point_color(false), REPORT_COLOR);
    }
}
