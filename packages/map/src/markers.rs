//! Pollution-source markers.
//!
//! Markers are standalone elements rather than layer features, so they are
//! torn down and recreated whenever the sources or the active categories
//! change.

use std::collections::BTreeSet;

use air_map_air_models::{PollutionSource, SourceCategory};

use crate::surface::{MapSurface, MarkerId, MarkerSpec};

/// Handles for the source markers currently on the surface.
#[derive(Debug, Default)]
pub struct SourceMarkers {
    handles: Vec<MarkerId>,
}

impl SourceMarkers {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of markers placed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether no markers are placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Removes every marker.
    pub fn clear<S: MapSurface>(&mut self, surface: &mut S) {
        for id in self.handles.drain(..) {
            surface.remove_marker(id);
        }
    }

    /// Replaces all markers with one per source in an active category.
    pub fn rebuild<S: MapSurface>(
        &mut self,
        surface: &mut S,
        sources: &[PollutionSource],
        active: &BTreeSet<SourceCategory>,
    ) {
        self.clear(surface);
        self.handles = sources
            .iter()
            .filter(|s| active.contains(&s.category))
            .map(|s| {
                surface.add_marker(MarkerSpec {
                    lng_lat: s.location.lng_lat(),
                    color: s.category.color().to_string(),
                    title: Some(s.name.clone()),
                })
            })
            .collect();
        log::trace!("Placed {} source markers", self.handles.len());
    }
}
