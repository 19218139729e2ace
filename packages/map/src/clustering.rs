//! Point clustering for the reports source.
//!
//! Points are projected to web-mercator pixels at the requested zoom and
//! merged greedily: each unvisited point absorbs every other unvisited point
//! within the cluster radius. Above the max zoom nothing is merged.

use std::f64::consts::PI;

use geojson::{Feature, Geometry, JsonObject, Value};

use crate::surface::ClusterOptions;

/// Pixel radius used for the reports source.
pub const REPORT_CLUSTER_RADIUS: u32 = 50;

/// Highest zoom at which reports are clustered.
pub const REPORT_CLUSTER_MAX_ZOOM: u32 = 14;

/// Property carrying the number of points in a cluster.
pub const POINT_COUNT: &str = "point_count";

/// Property carrying the short label for a cluster count.
pub const POINT_COUNT_ABBREVIATED: &str = "point_count_abbreviated";

/// Property carrying the cluster identifier.
pub const CLUSTER_ID: &str = "cluster_id";

const TILE_SIZE: f64 = 512.0;

/// Options used for the reports source.
#[must_use]
pub const fn report_cluster_options() -> ClusterOptions {
    ClusterOptions {
        cluster_radius: REPORT_CLUSTER_RADIUS,
        cluster_max_zoom: REPORT_CLUSTER_MAX_ZOOM,
    }
}

/// Projects `[lng, lat]` to world pixels at `zoom`.
#[must_use]
pub fn project(lng_lat: [f64; 2], zoom: f64) -> [f64; 2] {
    let scale = TILE_SIZE * 2_f64.powf(zoom);
    let x = (lng_lat[0] + 180.0) / 360.0;
    let sin = lng_lat[1].to_radians().sin().clamp(-0.9999, 0.9999);
    let y = 0.5 - ((1.0 + sin) / (1.0 - sin)).ln() / (4.0 * PI);
    [x * scale, y * scale]
}

/// Short label for a cluster count (`999`, `1.2k`, `15k`).
#[must_use]
pub fn abbreviate_count(count: usize) -> String {
    #[allow(clippy::cast_precision_loss)]
    let value = count as f64;
    if count >= 10_000 {
        format!("{}k", (value / 1000.0).round())
    } else if count >= 1000 {
        format!("{}k", (value / 100.0).round() / 10.0)
    } else {
        count.to_string()
    }
}

fn point_of(feature: &Feature) -> Option<[f64; 2]> {
    match feature.geometry.as_ref().map(|g| &g.value) {
        Some(Value::Point(coords)) if coords.len() >= 2 => Some([coords[0], coords[1]]),
        _ => None,
    }
}

/// Clusters point features at a zoom level.
///
/// Non-point features pass through unchanged. Clusters are emitted before
/// the remaining single points.
#[must_use]
pub fn cluster(features: &[Feature], zoom: f64, options: ClusterOptions) -> Vec<Feature> {
    if zoom > f64::from(options.cluster_max_zoom) {
        return features.to_vec();
    }

    let radius = f64::from(options.cluster_radius);
    let projected: Vec<Option<[f64; 2]>> = features
        .iter()
        .map(|f| point_of(f).map(|p| project(p, zoom)))
        .collect();

    let mut visited = vec![false; features.len()];
    let mut clusters = Vec::new();
    let mut singles = Vec::new();

    for (i, feature) in features.iter().enumerate() {
        if visited[i] {
            continue;
        }
        visited[i] = true;

        let Some(origin) = projected[i] else {
            singles.push(feature.clone());
            continue;
        };

        let mut members = vec![i];
        for (j, candidate) in projected.iter().enumerate().skip(i + 1) {
            if visited[j] {
                continue;
            }
            if let Some(p) = candidate {
                if (p[0] - origin[0]).hypot(p[1] - origin[1]) <= radius {
                    visited[j] = true;
                    members.push(j);
                }
            }
        }

        if members.len() == 1 {
            singles.push(feature.clone());
        } else {
            clusters.push(cluster_feature(features, &members, clusters.len()));
        }
    }

    clusters.extend(singles);
    clusters
}

fn cluster_feature(features: &[Feature], members: &[usize], id: usize) -> Feature {
    let points: Vec<[f64; 2]> = members
        .iter()
        .filter_map(|&i| point_of(&features[i]))
        .collect();
    #[allow(clippy::cast_precision_loss)]
    let n = points.len() as f64;
    let lng = points.iter().map(|p| p[0]).sum::<f64>() / n;
    let lat = points.iter().map(|p| p[1]).sum::<f64>() / n;

    let mut props = JsonObject::new();
    props.insert("cluster".to_string(), true.into());
    props.insert(CLUSTER_ID.to_string(), id.into());
    props.insert(POINT_COUNT.to_string(), members.len().into());
    props.insert(
        POINT_COUNT_ABBREVIATED.to_string(),
        abbreviate_count(members.len()).into(),
    );

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![lng, lat]))),
        id: None,
        properties: Some(props),
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lng: f64, lat: f64) -> Feature {
        Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Point(vec![lng, lat]))),
            id: None,
            properties: Some(JsonObject::new()),
            foreign_members: None,
        }
    }

    #[test]
    fn nearby_points_merge_at_low_zoom() {
        let features = vec![point(77.20, 28.61), point(77.21, 28.62), point(75.85, 30.90)];
        let out = cluster(&features, 8.0, report_cluster_options());

        assert_eq!(out.len(), 2);
        let props = out[0].properties.as_ref().unwrap();
        assert_eq!(props[POINT_COUNT], 2);
        assert_eq!(props[POINT_COUNT_ABBREVIATED], "2");
        assert!(!out[1].properties.as_ref().unwrap().contains_key(POINT_COUNT));
    }

    #[test]
    fn nothing_merges_above_max_zoom() {
        let features = vec![point(77.20, 28.61), point(77.2001, 28.6101)];
        let out = cluster(&features, 15.0, report_cluster_options());
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|f| !f.properties.as_ref().unwrap().contains_key(POINT_COUNT)));
    }

    #[test]
    fn cluster_is_at_member_centroid() {
        let features = vec![point(77.0, 28.0), point(77.02, 28.02)];
        let out = cluster(&features, 5.0, report_cluster_options());
        let Some(Value::Point(c)) = out[0].geometry.as_ref().map(|g| g.value.clone()) else {
            panic!("expected point");
        };
        assert!((c[0] - 77.01).abs() < 1e-9);
        assert!((c[1] - 28.01).abs() < 1e-9);
    }

    #[test]
    fn counts_abbreviate_like_the_renderer() {
        assert_eq!(abbreviate_count(7), "7");
        assert_eq!(abbreviate_count(999), "999");
        assert_eq!(abbreviate_count(1234), "1.2k");
        assert_eq!(abbreviate_count(15_400), "15k");
    }

    #[test]
    fn projection_doubles_per_zoom() {
        let a = project([10.0, 10.0], 3.0);
        let b = project([10.0, 10.0], 4.0);
        assert!((b[0] - 2.0 * a[0]).abs() < 1e-6);
        assert!((b[1] - 2.0 * a[1]).abs() < 1e-6);
    }
}
