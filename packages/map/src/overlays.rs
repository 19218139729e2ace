//! Overlay families and the idempotent upsert registry.
//!
//! Each family owns one source and one or more layers. The first apply
//! registers the source and its layers; every later apply only replaces
//! the source data. Layers are never recreated.

use std::collections::{BTreeMap, BTreeSet};

use air_map_air_models::Pollutant;
use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{AsRefStr, Display};

use crate::{
    clustering::{POINT_COUNT, report_cluster_options},
    paint,
    surface::{LayerFilter, LayerSpec, LayerType, MapSurface, SourceSpec, Visibility},
};

/// Station circle layer.
pub const STATIONS_LAYER: &str = "cpcb-layer";
/// Sensor circle layer.
pub const SENSORS_LAYER: &str = "sensors-layer";
/// Report cluster circles.
pub const REPORT_CLUSTERS_LAYER: &str = "reports-clusters";
/// Report cluster count labels.
pub const REPORT_CLUSTER_COUNT_LAYER: &str = "reports-cluster-count";
/// Unclustered report circles.
pub const REPORT_POINTS_LAYER: &str = "reports-unclustered";
/// Satellite fill layer.
pub const SATELLITE_LAYER: &str = "satellite-layer";
/// Traffic line layer.
pub const TRAFFIC_LAYER: &str = "traffic-layer";

/// A data family drawn on the map.
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
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OverlayKind {
    /// Official monitoring stations.
    #[serde(rename = "cpcb")]
    #[strum(serialize = "cpcb")]
    Stations,
    /// Citizen sensors.
    Sensors,
    /// Citizen reports (clustered).
    Reports,
    /// Mock satellite retrievals.
    Satellite,
    /// Mock traffic corridors.
    Traffic,
}

impl OverlayKind {
    /// Every family, in draw order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Stations,
            Self::Sensors,
            Self::Reports,
            Self::Satellite,
            Self::Traffic,
        ]
    }

    /// Source id on the surface.
    #[must_use]
    pub const fn source_id(self) -> &'static str {
        match self {
            Self::Stations => "cpcb-source",
            Self::Sensors => "sensors-source",
            Self::Reports => "reports-source",
            Self::Satellite => "satellite-source",
            Self::Traffic => "traffic-source",
        }
    }

    /// Layer ids belonging to the family.
    #[must_use]
    pub const fn layer_ids(self) -> &'static [&'static str] {
        match self {
            Self::Stations => &[STATIONS_LAYER],
            Self::Sensors => &[SENSORS_LAYER],
            Self::Reports => &[
                REPORT_CLUSTERS_LAYER,
                REPORT_CLUSTER_COUNT_LAYER,
                REPORT_POINTS_LAYER,
            ],
            Self::Satellite => &[SATELLITE_LAYER],
            Self::Traffic => &[TRAFFIC_LAYER],
        }
    }

    /// Toggle label in the command panel.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Stations => "Official CPCB",
            Self::Sensors => "Citizen Sensors",
            Self::Reports => "Citizen Reports",
            Self::Satellite => "Satellite (Mock)",
            Self::Traffic => "Traffic (Mock)",
        }
    }

    /// Toggle swatch color.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Stations | Self::Traffic => "#ef4444",
            Self::Sensors => "#3b82f6",
            Self::Reports => "#eab308",
            Self::Satellite => "#a855f7",
        }
    }

    /// Whether the family is shown when the dashboard opens.
    #[must_use]
    pub const fn default_active(self) -> bool {
        matches!(self, Self::Stations)
    }
}

/// A session-local layer toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerToggle {
    /// Family the toggle controls.
    pub kind: OverlayKind,
    /// Label.
    pub label: String,
    /// Whether the family is shown.
    pub active: bool,
    /// Swatch color.
    pub color: String,
}

/// Toggles in their opening state.
#[must_use]
pub fn default_toggles() -> Vec<LayerToggle> {
    OverlayKind::all()
        .iter()
        .map(|&kind| LayerToggle {
            kind,
            label: kind.label().to_string(),
            active: kind.default_active(),
            color: kind.color().to_string(),
        })
        .collect()
}

/// Style inputs that shape a family's layers when they are first added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleContext {
    /// Selected pollutant.
    pub pollutant: Pollutant,
    /// Whether fire mode is on.
    pub fire_mode: bool,
}

fn props(entries: &[(&str, Value)]) -> BTreeMap<String, Value> {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.clone()))
        .collect()
}

fn layer(
    id: &str,
    layer_type: LayerType,
    kind: OverlayKind,
    filter: Option<LayerFilter>,
    paint: &[(&str, Value)],
    layout: &[(&str, Value)],
) -> LayerSpec {
    LayerSpec {
        id: id.to_string(),
        layer_type,
        source: kind.source_id().to_string(),
        filter,
        paint: props(paint),
        layout: props(layout),
    }
}

/// The layers registered for a family.
#[must_use]
pub fn layer_specs(kind: OverlayKind, style: StyleContext) -> Vec<LayerSpec> {
    let color = paint::pollutant_color(style.pollutant);
    match kind {
        OverlayKind::Stations => vec![layer(
            STATIONS_LAYER,
            LayerType::Circle,
            kind,
            None,
            &[
                ("circle-radius", 8.into()),
                ("circle-color", color),
                ("circle-stroke-width", 2.into()),
                ("circle-stroke-color", paint::STROKE_COLOR.into()),
                ("circle-opacity", 0.9.into()),
            ],
            &[],
        )],
        OverlayKind::Sensors => vec![layer(
            SENSORS_LAYER,
            LayerType::Circle,
            kind,
            None,
            &[
                ("circle-radius", 5.into()),
                ("circle-color", color),
                ("circle-opacity", 0.6.into()),
                ("circle-stroke-width", 1.into()),
                ("circle-stroke-color", paint::STROKE_COLOR.into()),
            ],
            &[],
        )],
        OverlayKind::Reports => vec![
            layer(
                REPORT_CLUSTERS_LAYER,
                LayerType::Circle,
                kind,
                Some(LayerFilter::Has(POINT_COUNT.to_string())),
                &[
                    ("circle-color", paint::report_cluster_color(style.fire_mode)),
                    ("circle-radius", paint::report_cluster_radius()),
                ],
                &[],
            ),
            layer(
                REPORT_CLUSTER_COUNT_LAYER,
                LayerType::Symbol,
                kind,
                Some(LayerFilter::Has(POINT_COUNT.to_string())),
                &[],
                &[
                    ("text-field", "{point_count_abbreviated}".into()),
                    (
                        "text-font",
                        serde_json::json!(["DIN Offc Pro Medium", "Arial Unicode MS Bold"]),
                    ),
                    ("text-size", 12.into()),
                ],
            ),
            layer(
                REPORT_POINTS_LAYER,
                LayerType::Circle,
                kind,
                Some(LayerFilter::NotHas(POINT_COUNT.to_string())),
                &[
                    ("circle-radius", 6.into()),
                    ("circle-color", paint::report_point_color(style.fire_mode)),
                    ("circle-opacity", 0.8.into()),
                    ("circle-stroke-width", 1.into()),
                    ("circle-stroke-color", paint::STROKE_COLOR.into()),
                ],
                &[],
            ),
        ],
        OverlayKind::Satellite => vec![layer(
            SATELLITE_LAYER,
            LayerType::Fill,
            kind,
            None,
            &[
                ("fill-color", paint::satellite_fill_color()),
                ("fill-opacity", paint::satellite_fill_opacity()),
            ],
            &[],
        )],
        OverlayKind::Traffic => vec![layer(
            TRAFFIC_LAYER,
            LayerType::Line,
            kind,
            None,
            &[
                ("line-color", paint::traffic_line_color()),
                ("line-width", 4.into()),
                ("line-opacity", 0.8.into()),
            ],
            &[("line-join", "round".into()), ("line-cap", "round".into())],
        )],
    }
}

/// What an upsert did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// Source and layers were added.
    Registered,
    /// Only the source data was replaced.
    Replaced,
}

/// Tracks which families have been registered on a surface.
#[derive(Debug, Default)]
pub struct OverlayRegistry {
    registered: BTreeSet<OverlayKind>,
}

impl OverlayRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a family has been registered.
    #[must_use]
    pub fn is_registered(&self, kind: OverlayKind) -> bool {
        self.registered.contains(&kind)
    }

    /// Registers the family on first call, replaces its data afterwards.
    pub fn upsert<S: MapSurface>(
        &mut self,
        surface: &mut S,
        kind: OverlayKind,
        data: FeatureCollection,
        style: StyleContext,
    ) -> Upsert {
        let source = kind.source_id();
        if surface.has_source(source) {
            surface.set_source_data(source, data);
            self.registered.insert(kind);
            return Upsert::Replaced;
        }

        let cluster = matches!(kind, OverlayKind::Reports).then(report_cluster_options);
        surface.add_source(source, SourceSpec { data, cluster });
        for spec in layer_specs(kind, style) {
            if !surface.has_layer(&spec.id) {
                surface.add_layer(spec);
            }
        }
        log::debug!("Registered overlay {kind}");
        self.registered.insert(kind);
        Upsert::Registered
    }

    /// Shows or hides every layer of a family that exists.
    pub fn set_visible<S: MapSurface>(surface: &mut S, kind: OverlayKind, active: bool) {
        for layer in kind.layer_ids() {
            if surface.has_layer(layer) {
                surface.set_visibility(layer, Visibility::from(active));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{HeadlessSurface, SurfaceCall};

    fn empty() -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: vec![],
            foreign_members: None,
        }
    }

    const STYLE: StyleContext = StyleContext {
        pollutant: Pollutant::Pm25,
        fire_mode: false,
    };

    #[test]
    fn first_upsert_registers_then_only_replaces() {
        let mut surface = HeadlessSurface::new();
        let mut registry = OverlayRegistry::new();

        assert_eq!(
            registry.upsert(&mut surface, OverlayKind::Reports, empty(), STYLE),
            Upsert::Registered
        );
        assert_eq!(surface.layer_ids().len(), 3);
        surface.clear_calls();

        assert_eq!(
            registry.upsert(&mut surface, OverlayKind::Reports, empty(), STYLE),
            Upsert::Replaced
        );
        assert_eq!(
            surface.calls(),
            &[SurfaceCall::SetSourceData("reports-source".to_string())]
        );
        assert!(registry.is_registered(OverlayKind::Reports));
    }

    #[test]
    fn every_family_has_layers_for_each_id() {
        for &kind in OverlayKind::all() {
            let ids: Vec<String> = layer_specs(kind, STYLE).into_iter().map(|l| l.id).collect();
            assert_eq!(ids, kind.layer_ids());
        }
    }

    #[test]
    fn toggles_open_with_only_stations_on() {
        let toggles = default_toggles();
        assert_eq!(toggles.len(), 5);
        assert!(toggles[0].active);
        assert_eq!(toggles[0].kind.as_ref(), "cpcb");
        assert!(toggles[1..].iter().all(|t| !t.active));
    }
}
