//! In-memory [`MapSurface`] for tests and server-side rendering checks.
//!
//! Records every call in order and keeps enough state (sources, layers,
//! paint, visibility, camera, popup, markers) to answer
//! [`HeadlessSurface::rendered_features`] the way the renderer would.

use std::collections::BTreeMap;

use geojson::{Feature, FeatureCollection};

use crate::{
    clustering,
    surface::{
        CameraTarget, LayerSpec, MapSurface, MarkerId, MarkerSpec, Popup, SourceSpec, Visibility,
    },
};

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    /// `add_source(id, ..)`.
    AddSource(String),
    /// `set_source_data(id, ..)`.
    SetSourceData(String),
    /// `add_layer(spec)` with the layer id.
    AddLayer(String),
    /// `set_paint_property(layer, property, ..)`.
    SetPaint {
        /// Layer id.
        layer: String,
        /// Paint property name.
        property: String,
    },
    /// `set_visibility(layer, visibility)`.
    SetVisibility {
        /// Layer id.
        layer: String,
        /// New visibility.
        visibility: Visibility,
    },
    /// `fly_to(target)`.
    FlyTo(CameraTarget),
    /// `show_popup(..)`.
    ShowPopup,
    /// `remove_popup()`.
    RemovePopup,
    /// `add_marker(..)` with the returned handle.
    AddMarker(MarkerId),
    /// `remove_marker(id)`.
    RemoveMarker(MarkerId),
}

impl SurfaceCall {
    /// Whether the call mutates sources or layers structurally.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(self, Self::AddSource(_) | Self::AddLayer(_))
    }
}

/// Rendering-free map surface.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    sources: BTreeMap<String, SourceSpec>,
    layers: Vec<LayerSpec>,
    visibility: BTreeMap<String, Visibility>,
    camera: Option<CameraTarget>,
    popup: Option<Popup>,
    markers: BTreeMap<MarkerId, MarkerSpec>,
    next_marker: u64,
    calls: Vec<SurfaceCall>,
}

impl HeadlessSurface {
    /// Creates an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call received so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// Forgets recorded calls, keeping state.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Current data of a source.
    #[must_use]
    pub fn source_data(&self, id: &str) -> Option<&FeatureCollection> {
        self.sources.get(id).map(|s| &s.data)
    }

    /// A registered layer.
    #[must_use]
    pub fn layer(&self, id: &str) -> Option<&LayerSpec> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// Layer ids in draw order.
    #[must_use]
    pub fn layer_ids(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.id.as_str()).collect()
    }

    /// Current value of a paint property.
    #[must_use]
    pub fn paint(&self, layer: &str, property: &str) -> Option<&serde_json::Value> {
        self.layer(layer).and_then(|l| l.paint.get(property))
    }

    /// Current visibility of a layer. Layers start visible.
    #[must_use]
    pub fn visibility(&self, layer: &str) -> Option<Visibility> {
        self.layer(layer)
            .map(|_| self.visibility.get(layer).copied().unwrap_or(Visibility::Visible))
    }

    /// Where the last fly-to went.
    #[must_use]
    pub const fn camera(&self) -> Option<&CameraTarget> {
        self.camera.as_ref()
    }

    /// The open popup.
    #[must_use]
    pub const fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    /// Markers currently placed.
    #[must_use]
    pub fn markers(&self) -> Vec<&MarkerSpec> {
        self.markers.values().collect()
    }

    /// Features a layer would draw at `zoom`.
    ///
    /// Hidden or unknown layers draw nothing. Clustered sources are
    /// clustered first, then the layer filter applies.
    #[must_use]
    pub fn rendered_features(&self, layer: &str, zoom: f64) -> Vec<Feature> {
        let Some(spec) = self.layer(layer) else {
            return vec![];
        };
        if self.visibility(layer) == Some(Visibility::Hidden) {
            return vec![];
        }
        let Some(source) = self.sources.get(&spec.source) else {
            return vec![];
        };

        let features = match source.cluster {
            Some(options) => clustering::cluster(&source.data.features, zoom, options),
            None => source.data.features.clone(),
        };

        features
            .into_iter()
            .filter(|f| {
                spec.filter
                    .as_ref()
                    .is_none_or(|filter| filter.matches(f.properties.as_ref()))
            })
            .collect()
    }
}

impl MapSurface for HeadlessSurface {
    fn has_source(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    fn add_source(&mut self, id: &str, spec: SourceSpec) {
        self.calls.push(SurfaceCall::AddSource(id.to_string()));
        if self.sources.contains_key(id) {
            log::error!("Source {id} already exists");
            return;
        }
        self.sources.insert(id.to_string(), spec);
    }

    fn set_source_data(&mut self, id: &str, data: FeatureCollection) {
        self.calls.push(SurfaceCall::SetSourceData(id.to_string()));
        match self.sources.get_mut(id) {
            Some(source) => source.data = data,
            None => log::warn!("set_source_data on missing source {id}"),
        }
    }

    fn has_layer(&self, id: &str) -> bool {
        self.layer(id).is_some()
    }

    fn add_layer(&mut self, spec: LayerSpec) {
        self.calls.push(SurfaceCall::AddLayer(spec.id.clone()));
        if self.has_layer(&spec.id) {
            log::error!("Layer {} already exists", spec.id);
            return;
        }
        if !self.sources.contains_key(&spec.source) {
            log::error!("Layer {} references missing source {}", spec.id, spec.source);
            return;
        }
        self.layers.push(spec);
    }

    fn set_paint_property(&mut self, layer: &str, property: &str, value: serde_json::Value) {
        self.calls.push(SurfaceCall::SetPaint {
            layer: layer.to_string(),
            property: property.to_string(),
        });
        match self.layers.iter_mut().find(|l| l.id == layer) {
            Some(spec) => {
                spec.paint.insert(property.to_string(), value);
            }
            None => log::warn!("set_paint_property on missing layer {layer}"),
        }
    }

    fn set_visibility(&mut self, layer: &str, visibility: Visibility) {
        self.calls.push(SurfaceCall::SetVisibility {
            layer: layer.to_string(),
            visibility,
        });
        if self.has_layer(layer) {
            self.visibility.insert(layer.to_string(), visibility);
        } else {
            log::warn!("set_visibility on missing layer {layer}");
        }
    }

    fn fly_to(&mut self, target: CameraTarget) {
        self.calls.push(SurfaceCall::FlyTo(target));
        self.camera = Some(target);
    }

    fn show_popup(&mut self, popup: Popup) {
        self.calls.push(SurfaceCall::ShowPopup);
        self.popup = Some(popup);
    }

    fn remove_popup(&mut self) {
        self.calls.push(SurfaceCall::RemovePopup);
        self.popup = None;
    }

    fn add_marker(&mut self, marker: MarkerSpec) -> MarkerId {
        let id = MarkerId(self.next_marker);
        self.next_marker += 1;
        self.calls.push(SurfaceCall::AddMarker(id));
        self.markers.insert(id, marker);
        id
    }

    fn remove_marker(&mut self, id: MarkerId) {
        self.calls.push(SurfaceCall::RemoveMarker(id));
        self.markers.remove(&id);
    }
}
