//! The narrow interface the map view drives.
//!
//! A [`MapSurface`] stands in for the vector-map rendering engine. The view
//! only ever registers sources and layers, replaces source data, updates
//! paint and visibility, moves the camera, and manages a popup and a set of
//! DOM-style markers. Anything else the engine does (tiles, gestures, the
//! render loop) stays behind the implementation.

use std::collections::BTreeMap;

use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};

/// Clustering options for a point source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterOptions {
    /// Pixel radius points are merged within.
    pub cluster_radius: u32,
    /// Highest zoom at which points are still clustered.
    pub cluster_max_zoom: u32,
}

/// A `GeoJSON` data source.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSpec {
    /// Initial data.
    pub data: FeatureCollection,
    /// Clustering, for point sources that need it.
    pub cluster: Option<ClusterOptions>,
}

/// How a layer draws its features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerType {
    /// Circles at point positions.
    Circle,
    /// Text labels.
    Symbol,
    /// Filled polygons.
    Fill,
    /// Stroked lines.
    Line,
}

/// Feature filter applied by a layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerFilter {
    /// Only features that have the property.
    Has(String),
    /// Only features that lack the property.
    NotHas(String),
}

impl LayerFilter {
    /// Whether a feature's properties pass the filter.
    #[must_use]
    pub fn matches(&self, properties: Option<&geojson::JsonObject>) -> bool {
        let has = |key: &str| properties.is_some_and(|p| p.contains_key(key));
        match self {
            Self::Has(key) => has(key),
            Self::NotHas(key) => !has(key),
        }
    }

    /// The filter as a style-spec expression.
    #[must_use]
    pub fn to_expression(&self) -> serde_json::Value {
        match self {
            Self::Has(key) => serde_json::json!(["has", key]),
            Self::NotHas(key) => serde_json::json!(["!", ["has", key]]),
        }
    }
}

/// A style layer bound to a source.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSpec {
    /// Layer identifier.
    pub id: String,
    /// Drawing type.
    pub layer_type: LayerType,
    /// Source the layer reads from.
    pub source: String,
    /// Optional feature filter.
    pub filter: Option<LayerFilter>,
    /// Paint properties (`circle-color`, `line-width`, ...).
    pub paint: BTreeMap<String, serde_json::Value>,
    /// Layout properties (`text-field`, `line-cap`, ...).
    pub layout: BTreeMap<String, serde_json::Value>,
}

/// Layer visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Drawn.
    Visible,
    /// Hidden.
    #[serde(rename = "none")]
    Hidden,
}

impl From<bool> for Visibility {
    fn from(active: bool) -> Self {
        if active { Self::Visible } else { Self::Hidden }
    }
}

/// Where the camera should end up after a fly-to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraTarget {
    /// Target as `[lng, lat]`.
    pub center: [f64; 2],
    /// Zoom level.
    pub zoom: f64,
    /// Pitch in degrees, if it should change.
    pub pitch: Option<f64>,
}

/// Text shown in the shared popup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopupContent {
    /// Heading line.
    pub title: String,
    /// Detail lines, in display order.
    pub lines: Vec<String>,
}

/// A popup anchored at a position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Popup {
    /// Anchor as `[lng, lat]`.
    pub lng_lat: [f64; 2],
    /// What to show.
    pub content: PopupContent,
}

/// A standalone marker element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerSpec {
    /// Position as `[lng, lat]`.
    pub lng_lat: [f64; 2],
    /// Fill color.
    pub color: String,
    /// Hover title.
    pub title: Option<String>,
}

/// Handle for removing a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerId(pub u64);

/// The rendering-engine operations the map view relies on.
///
/// Mutating calls on a missing source or layer are the caller's problem:
/// the view checks [`MapSurface::has_source`] / [`MapSurface::has_layer`]
/// first and skips what isn't there.
pub trait MapSurface {
    /// Whether a source with this id is registered.
    fn has_source(&self, id: &str) -> bool;

    /// Registers a new source.
    fn add_source(&mut self, id: &str, spec: SourceSpec);

    /// Replaces the data of an existing source.
    fn set_source_data(&mut self, id: &str, data: FeatureCollection);

    /// Whether a layer with this id is registered.
    fn has_layer(&self, id: &str) -> bool;

    /// Registers a new layer on top of the existing ones.
    fn add_layer(&mut self, spec: LayerSpec);

    /// Updates one paint property of an existing layer.
    fn set_paint_property(&mut self, layer: &str, property: &str, value: serde_json::Value);

    /// Shows or hides an existing layer.
    fn set_visibility(&mut self, layer: &str, visibility: Visibility);

    /// Animates the camera to a target.
    fn fly_to(&mut self, target: CameraTarget);

    /// Shows the popup, replacing any popup already open.
    fn show_popup(&mut self, popup: Popup);

    /// Removes the popup if one is open.
    fn remove_popup(&mut self);

    /// Adds a marker and returns its handle.
    fn add_marker(&mut self, marker: MarkerSpec) -> MarkerId;

    /// Removes a marker. Unknown handles are ignored.
    fn remove_marker(&mut self, id: MarkerId);
}
