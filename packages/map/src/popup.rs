//! Popup content derived from feature properties.

use air_map_air_models::AqiBand;
use geojson::{Feature, JsonObject, Value};

use crate::{
    clustering::POINT_COUNT,
    overlays::{
        REPORT_CLUSTERS_LAYER, REPORT_POINTS_LAYER, SATELLITE_LAYER, SENSORS_LAYER,
        STATIONS_LAYER, TRAFFIC_LAYER,
    },
    surface::{Popup, PopupContent},
};

fn text(props: &JsonObject, key: &str) -> Option<String> {
    match props.get(key)? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn number(props: &JsonObject, key: &str) -> Option<f64> {
    props.get(key).and_then(serde_json::Value::as_f64)
}

/// Builds popup content for a feature hovered on `layer`.
///
/// Returns `None` for layers without popups and for features missing the
/// properties the popup needs.
#[must_use]
pub fn popup_content(layer: &str, props: &JsonObject) -> Option<PopupContent> {
    match layer {
        STATIONS_LAYER => {
            let aqi = props.get("aqi").and_then(serde_json::Value::as_u64)?;
            let band = AqiBand::classify(u32::try_from(aqi).unwrap_or(u32::MAX));
            Some(PopupContent {
                title: text(props, "name")?,
                lines: vec![
                    format!("AQI: {aqi} ({})", band.label()),
                    format!("PM2.5: {}", text(props, "pm25").unwrap_or_default()),
                    format!("PM10: {}", text(props, "pm10").unwrap_or_default()),
                    format!("Source: {}", text(props, "source").unwrap_or_default()),
                ],
            })
        }
        SENSORS_LAYER => {
            let confidence = number(props, "confidence")? * 100.0;
            Some(PopupContent {
                title: "Citizen Sensor".to_string(),
                lines: vec![
                    format!("PM2.5: {}", number(props, "pm25")?),
                    format!("PM10: {}", number(props, "pm10")?),
                    format!("Confidence: {confidence:.0}%"),
                ],
            })
        }
        REPORT_CLUSTERS_LAYER => Some(PopupContent {
            title: format!("{} reports", text(props, POINT_COUNT)?),
            lines: vec!["Zoom in to see individual reports".to_string()],
        }),
        REPORT_POINTS_LAYER => {
            let report_type: air_map_air_models::ReportType =
                serde_json::from_value(props.get("type")?.clone()).ok()?;
            let mut lines = vec![
                format!("Severity: {}/5", text(props, "severity")?),
                format!("Status: {}", text(props, "status").unwrap_or_default()),
            ];
            if let Some(description) = text(props, "description") {
                lines.push(description);
            }
            Some(PopupContent {
                title: report_type.label().to_string(),
                lines,
            })
        }
        SATELLITE_LAYER => Some(PopupContent {
            title: format!("Satellite {}", text(props, "type")?),
            lines: vec![format!("Intensity: {:.2}", number(props, "value")?)],
        }),
        TRAFFIC_LAYER => Some(PopupContent {
            title: format!("Traffic: {}", text(props, "congestionLevel")?),
            lines: vec![format!("Speed: {} km/h", text(props, "speed")?)],
        }),
        _ => None,
    }
}

/// Builds the popup for a hovered feature.
///
/// Point features anchor at their own position; other geometries anchor
/// at the pointer.
#[must_use]
pub fn popup_for(layer: &str, feature: &Feature, pointer: [f64; 2]) -> Option<Popup> {
    let content = popup_content(layer, feature.properties.as_ref()?)?;
    let lng_lat = match feature.geometry.as_ref().map(|g| &g.value) {
        Some(Value::Point(c)) if c.len() >= 2 => [c[0], c[1]],
        _ => pointer,
    };
    Some(Popup { lng_lat, content })
}
