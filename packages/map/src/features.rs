//! Record to `GeoJSON` conversion.
//!
//! Every feature carries the record's own fields (camelCase, as serialized)
//! as properties, which is what popups and data-driven paint read from.

use air_map_air_models::{CitizenReport, CitizenSensor, SatelliteData, Station, TrafficData};
use air_map_geography_models::Located;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde::Serialize;

/// Property naming the kind of record a point feature came from.
pub const ICON_PROPERTY: &str = "icon";

/// Serializes a record into a property object, optionally dropping fields
/// that are already carried by the geometry.
fn properties<T: Serialize>(record: &T, drop: &[&str]) -> JsonObject {
    let mut props = match serde_json::to_value(record) {
        Ok(serde_json::Value::Object(map)) => map,
        Ok(_) => JsonObject::new(),
        Err(e) => {
            log::error!("Failed to serialize feature properties: {e}");
            JsonObject::new()
        }
    };
    for key in drop {
        props.remove(*key);
    }
    props
}

fn feature(geometry: Value, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(geometry)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn collection(features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Builds a point feature for any located record, tagged with `icon`.
#[must_use]
pub fn point_feature<T: Serialize + Located>(record: &T, icon: &str) -> Feature {
    let mut props = properties(record, &[]);
    props.insert(ICON_PROPERTY.to_string(), icon.into());
    feature(Value::Point(record.location().lng_lat().to_vec()), props)
}

/// Station points.
#[must_use]
pub fn stations_collection(stations: &[Station]) -> FeatureCollection {
    collection(stations.iter().map(|s| point_feature(s, "station")).collect())
}

/// Citizen-sensor points.
#[must_use]
pub fn sensors_collection(sensors: &[CitizenSensor]) -> FeatureCollection {
    collection(sensors.iter().map(|s| point_feature(s, "sensor")).collect())
}

/// Report points. In fire mode only burning reports are included.
#[must_use]
pub fn reports_collection(reports: &[CitizenReport], fire_mode: bool) -> FeatureCollection {
    collection(
        reports
            .iter()
            .filter(|r| !fire_mode || r.report_type.is_burning())
            .map(|r| point_feature(r, "report"))
            .collect(),
    )
}

/// Satellite footprint polygons.
#[must_use]
pub fn satellite_collection(layers: &[SatelliteData]) -> FeatureCollection {
    collection(
        layers
            .iter()
            .map(|s| {
                let ring = s.ring.iter().map(|p| p.to_vec()).collect();
                feature(Value::Polygon(vec![ring]), properties(s, &["ring"]))
            })
            .collect(),
    )
}

/// Traffic corridor lines.
#[must_use]
pub fn traffic_collection(layers: &[TrafficData]) -> FeatureCollection {
    collection(
        layers
            .iter()
            .map(|t| {
                let path = t.path.iter().map(|p| p.to_vec()).collect();
                feature(Value::LineString(path), properties(t, &["path"]))
            })
            .collect(),
    )
}
