//! The map view: owns the surface and keeps it in step with view state.
//!
//! Every mutation goes through `&mut self`. Data is re-synced wholesale via
//! [`MapView::set_data`]; the finer-grained operations (pollutant, fire
//! mode, toggles) touch only what they change.

use std::collections::BTreeSet;

use air_map_air_models::{AqiStatus, Pollutant, Region, SourceCategory, aqi_status};
use air_map_geography::{REGION_PITCH, nearest, preset};
use air_map_geography_models::Coordinates;
use air_map_server_models::DashboardResponse;
use geojson::Feature;

use crate::{
    features,
    geolocation::{GeolocationError, Geolocator},
    markers::SourceMarkers,
    overlays::{
        self, LayerToggle, OverlayKind, OverlayRegistry, REPORT_CLUSTERS_LAYER,
        REPORT_POINTS_LAYER, SENSORS_LAYER, STATIONS_LAYER, StyleContext,
    },
    paint,
    popup::popup_for,
    report_form::ReportForm,
    surface::{CameraTarget, MapSurface, MarkerId, MarkerSpec},
};

/// Zoom used after a successful location fix.
pub const LOCATE_ZOOM: f64 = 15.0;

/// Result of [`MapView::mount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountOutcome {
    /// The surface was attached and synced.
    Mounted,
    /// A surface was already attached; nothing changed.
    AlreadyMounted,
    /// No container was available; try again later.
    NoContainer,
}

/// Result of asking to start report placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementStart {
    /// Placement mode is on.
    Placing,
    /// The user has to sign in first.
    SignInRequired,
}

/// A blocking message shown over the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Text to show.
    pub message: String,
}

/// The closest station to a location fix and how safe its air is.
#[derive(Debug, Clone, PartialEq)]
pub struct SafetyCheck {
    /// Station id.
    pub station_id: String,
    /// Station name.
    pub station_name: String,
    /// Distance to the station.
    pub distance_km: f64,
    /// Classified AQI at the station.
    pub status: AqiStatus,
}

/// Outcome of a successful "use my location".
#[derive(Debug, Clone, PartialEq)]
pub struct LocationFix {
    /// The device position.
    pub position: Coordinates,
    /// Nearest-station check, when any stations are loaded.
    pub safety: Option<SafetyCheck>,
    /// Whether the fix was captured as a report location.
    pub captured_for_report: bool,
}

/// Map view state bound to a [`MapSurface`].
#[derive(Debug)]
pub struct MapView<S: MapSurface> {
    surface: Option<S>,
    registry: OverlayRegistry,
    markers: SourceMarkers,
    data: DashboardResponse,
    pollutant: Pollutant,
    region: Region,
    fire_mode: bool,
    toggles: Vec<LayerToggle>,
    active_categories: BTreeSet<SourceCategory>,
    placing_report: bool,
    pin: Option<MarkerId>,
    report_form: Option<ReportForm>,
    alert: Option<Alert>,
    popup_open: bool,
    safety: Option<SafetyCheck>,
}

impl<S: MapSurface> Default for MapView<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: MapSurface> MapView<S> {
    /// Creates an unmounted view in its opening state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            surface: None,
            registry: OverlayRegistry::new(),
            markers: SourceMarkers::new(),
            data: DashboardResponse::default(),
            pollutant: Pollutant::default(),
            region: Region::default(),
            fire_mode: false,
            toggles: overlays::default_toggles(),
            active_categories: BTreeSet::new(),
            placing_report: false,
            pin: None,
            report_form: None,
            alert: None,
            popup_open: false,
            safety: None,
        }
    }

    /// Attaches a surface once. Later calls leave the first surface in
    /// place; a missing container changes nothing.
    pub fn mount(&mut self, container: Option<S>) -> MountOutcome {
        if self.surface.is_some() {
            return MountOutcome::AlreadyMounted;
        }
        let Some(mut surface) = container else {
            log::debug!("Map container not ready, skipping mount");
            return MountOutcome::NoContainer;
        };

        let start = preset(self.region);
        surface.fly_to(CameraTarget {
            center: start.center,
            zoom: start.zoom,
            pitch: Some(REGION_PITCH),
        });
        self.surface = Some(surface);
        self.sync();
        self.rebuild_markers();
        MountOutcome::Mounted
    }

    /// Whether a surface is attached.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    /// The attached surface.
    #[must_use]
    pub const fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// The attached surface, mutably.
    pub const fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// The data currently shown.
    #[must_use]
    pub const fn data(&self) -> &DashboardResponse {
        &self.data
    }

    /// Selected pollutant.
    #[must_use]
    pub const fn pollutant(&self) -> Pollutant {
        self.pollutant
    }

    /// Selected region.
    #[must_use]
    pub const fn region(&self) -> Region {
        self.region
    }

    /// Whether fire mode is on.
    #[must_use]
    pub const fn fire_mode(&self) -> bool {
        self.fire_mode
    }

    /// Layer toggles in panel order.
    #[must_use]
    pub fn toggles(&self) -> &[LayerToggle] {
        &self.toggles
    }

    /// Whether an overlay family is shown.
    #[must_use]
    pub fn is_active(&self, kind: OverlayKind) -> bool {
        self.toggles.iter().any(|t| t.kind == kind && t.active)
    }

    /// Source categories whose markers are shown.
    #[must_use]
    pub const fn active_categories(&self) -> &BTreeSet<SourceCategory> {
        &self.active_categories
    }

    /// Number of source markers placed.
    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Whether report placement mode is on.
    #[must_use]
    pub const fn is_placing_report(&self) -> bool {
        self.placing_report
    }

    /// The open report form.
    #[must_use]
    pub const fn report_form(&self) -> Option<&ReportForm> {
        self.report_form.as_ref()
    }

    /// The open report form, mutably.
    pub const fn report_form_mut(&mut self) -> Option<&mut ReportForm> {
        self.report_form.as_mut()
    }

    /// Closes the report form and removes its pin.
    pub fn close_report_form(&mut self) {
        self.report_form = None;
        if let (Some(pin), Some(surface)) = (self.pin.take(), self.surface.as_mut()) {
            surface.remove_marker(pin);
        }
    }

    /// The blocking alert, if one is up.
    #[must_use]
    pub const fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    /// Dismisses the alert.
    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// The last nearest-station check.
    #[must_use]
    pub const fn safety(&self) -> Option<&SafetyCheck> {
        self.safety.as_ref()
    }

    const fn style(&self) -> StyleContext {
        StyleContext {
            pollutant: self.pollutant,
            fire_mode: self.fire_mode,
        }
    }

    /// Replaces all data and re-syncs every overlay and marker.
    pub fn set_data(&mut self, data: DashboardResponse) {
        self.data = data;
        self.sync();
        self.rebuild_markers();
    }

    fn sync(&mut self) {
        let style = self.style();
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let data = &self.data;
        let collections = [
            (
                OverlayKind::Stations,
                features::stations_collection(&data.stations),
            ),
            (
                OverlayKind::Sensors,
                features::sensors_collection(&data.sensors),
            ),
            (
                OverlayKind::Reports,
                features::reports_collection(&data.reports, self.fire_mode),
            ),
            (
                OverlayKind::Satellite,
                features::satellite_collection(&data.satellite),
            ),
            (
                OverlayKind::Traffic,
                features::traffic_collection(&data.traffic),
            ),
        ];
        for (kind, collection) in collections {
            self.registry.upsert(surface, kind, collection, style);
        }
        for toggle in &self.toggles {
            OverlayRegistry::set_visible(surface, toggle.kind, toggle.active);
        }
    }

    fn apply_pollutant_paint(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        for layer in [STATIONS_LAYER, SENSORS_LAYER] {
            if surface.has_layer(layer) {
                surface.set_paint_property(
                    layer,
                    "circle-color",
                    paint::pollutant_color(self.pollutant),
                );
            }
        }
    }

    /// Recolors stations and sensors for a pollutant. Paint only.
    pub fn select_pollutant(&mut self, pollutant: Pollutant) {
        if self.pollutant == pollutant {
            return;
        }
        self.pollutant = pollutant;
        self.apply_pollutant_paint();
    }

    /// Flies the camera to a region preset.
    pub fn select_region(&mut self, region: Region) {
        self.region = region;
        let target = preset(region);
        if let Some(surface) = self.surface.as_mut() {
            surface.fly_to(CameraTarget {
                center: target.center,
                zoom: target.zoom,
                pitch: Some(REGION_PITCH),
            });
        }
    }

    /// Flips an overlay family on or off.
    pub fn toggle_layer(&mut self, kind: OverlayKind) {
        let Some(toggle) = self.toggles.iter_mut().find(|t| t.kind == kind) else {
            return;
        };
        toggle.active = !toggle.active;
        let active = toggle.active;
        if let Some(surface) = self.surface.as_mut() {
            OverlayRegistry::set_visible(surface, kind, active);
        }
    }

    /// Turns fire mode on or off, updating report data and paint together.
    pub fn set_fire_mode(&mut self, on: bool) {
        if self.fire_mode == on {
            return;
        }
        self.fire_mode = on;
        let style = self.style();
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        let collection = features::reports_collection(&self.data.reports, on);
        self.registry
            .upsert(surface, OverlayKind::Reports, collection, style);
        if surface.has_layer(REPORT_CLUSTERS_LAYER) {
            surface.set_paint_property(
                REPORT_CLUSTERS_LAYER,
                "circle-color",
                paint::report_cluster_color(on),
            );
        }
        if surface.has_layer(REPORT_POINTS_LAYER) {
            surface.set_paint_property(
                REPORT_POINTS_LAYER,
                "circle-color",
                paint::report_point_color(on),
            );
        }
    }

    /// Shows or hides markers for a source category.
    pub fn toggle_source_category(&mut self, category: SourceCategory) {
        if !self.active_categories.remove(&category) {
            self.active_categories.insert(category);
        }
        self.rebuild_markers();
    }

    fn rebuild_markers(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            self.markers
                .rebuild(surface, &self.data.sources, &self.active_categories);
        }
    }

    /// Opens the shared popup for a hovered feature, replacing any open one.
    pub fn hover(&mut self, layer: &str, feature: &Feature, pointer: [f64; 2]) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let Some(popup) = popup_for(layer, feature, pointer) else {
            return;
        };
        if self.popup_open {
            surface.remove_popup();
        }
        surface.show_popup(popup);
        self.popup_open = true;
    }

    /// Removes the popup when the pointer leaves a feature.
    pub fn leave(&mut self) {
        if !self.popup_open {
            return;
        }
        if let Some(surface) = self.surface.as_mut() {
            surface.remove_popup();
        }
        self.popup_open = false;
    }

    /// Enters report placement mode for a signed-in user.
    pub const fn begin_report_placement(&mut self, signed_in: bool) -> PlacementStart {
        if !signed_in {
            return PlacementStart::SignInRequired;
        }
        self.placing_report = true;
        PlacementStart::Placing
    }

    /// Leaves report placement mode.
    pub const fn cancel_report_placement(&mut self) {
        self.placing_report = false;
    }

    /// Captures a report location: drops the pin, opens the form and leaves
    /// placement mode. Does nothing outside placement mode.
    pub fn place_report_at(&mut self, location: Coordinates) -> bool {
        if !self.placing_report {
            return false;
        }
        self.placing_report = false;
        if let Some(surface) = self.surface.as_mut() {
            if let Some(old) = self.pin.take() {
                surface.remove_marker(old);
            }
            self.pin = Some(surface.add_marker(MarkerSpec {
                lng_lat: location.lng_lat(),
                color: paint::PIN_COLOR.to_string(),
                title: None,
            }));
        }
        self.report_form = Some(ReportForm::new(location));
        true
    }

    /// Requests one location fix, recenters on it and checks the nearest
    /// station. In placement mode the fix becomes the report location.
    ///
    /// # Errors
    ///
    /// * If the geolocator fails; an [`Alert`] is raised as well
    pub async fn use_my_location(
        &mut self,
        geolocator: &dyn Geolocator,
    ) -> Result<LocationFix, GeolocationError> {
        let position = match geolocator.current_position().await {
            Ok(position) => position,
            Err(e) => {
                log::warn!("Geolocation failed: {e}");
                self.alert = Some(Alert {
                    message: e.to_string(),
                });
                return Err(e);
            }
        };

        if let Some(surface) = self.surface.as_mut() {
            surface.fly_to(CameraTarget {
                center: position.lng_lat(),
                zoom: LOCATE_ZOOM,
                pitch: None,
            });
        }

        self.safety = nearest(position, &self.data.stations).map(|n| SafetyCheck {
            station_id: n.item.id.clone(),
            station_name: n.item.name.clone(),
            distance_km: n.distance_km,
            status: aqi_status(n.item.aqi),
        });

        let captured_for_report = self.place_report_at(position);

        Ok(LocationFix {
            position,
            safety: self.safety.clone(),
            captured_for_report,
        })
    }
}

#[cfg(test)]
mod tests {
    use air_map_air_models::{
        CitizenReport, PollutionSource, ReportStatus, ReportType, Severity, Station,
        StationSource,
    };
    use chrono::Utc;

    use super::*;
    use crate::{
        geolocation::FixedGeolocator,
        headless::{HeadlessSurface, SurfaceCall},
        report_form::FormState,
        surface::Visibility,
    };

    fn station(id: &str, lat: f64, lng: f64, aqi: u32) -> Station {
        Station {
            id: id.to_string(),
            name: format!("Station {id}"),
            location: Coordinates::new(lat, lng),
            aqi,
            pm25: aqi,
            pm10: aqi,
            no2: 10,
            so2: 5,
            co: 15,
            source: StationSource::Cpcb,
            last_updated: Utc::now(),
        }
    }

    fn report(i: usize, report_type: ReportType) -> CitizenReport {
        #[allow(clippy::cast_precision_loss)]
        let offset = i as f64 * 0.5;
        CitizenReport {
            id: format!("r{i}"),
            report_type,
            severity: Severity::default(),
            location: Coordinates::new(28.0 + offset, 74.0 + offset),
            timestamp: Utc::now(),
            status: ReportStatus::Pending,
            description: None,
        }
    }

    fn source(id: &str, category: SourceCategory) -> PollutionSource {
        PollutionSource {
            id: id.to_string(),
            name: id.to_string(),
            category,
            sub_type: "Brick Kiln".to_string(),
            location: Coordinates::new(28.6, 77.2),
        }
    }

    fn data() -> DashboardResponse {
        let mut reports: Vec<CitizenReport> =
            (0..3).map(|i| report(i, ReportType::GarbageBurning)).collect();
        reports.extend((3..8).map(|i| report(i, ReportType::ConstructionDust)));
        DashboardResponse {
            stations: vec![
                station("a", 28.65, 77.31, 412),
                station("b", 28.56, 77.07, 45),
            ],
            reports,
            sources: vec![
                source("kiln", SourceCategory::BrickConstructionMaterials),
                source("plant", SourceCategory::PowerEnergy),
                source("landfill", SourceCategory::WasteBurning),
            ],
            ..DashboardResponse::default()
        }
    }

    fn mounted() -> MapView<HeadlessSurface> {
        let mut view = MapView::new();
        view.set_data(data());
        assert_eq!(view.mount(Some(HeadlessSurface::new())), MountOutcome::Mounted);
        view
    }

    fn surface(view: &MapView<HeadlessSurface>) -> &HeadlessSurface {
        view.surface().unwrap()
    }

    #[test]
    fn second_mount_is_a_noop() {
        let mut view = mounted();
        let layers = surface(&view).layer_ids().len();

        assert_eq!(
            view.mount(Some(HeadlessSurface::new())),
            MountOutcome::AlreadyMounted
        );
        assert_eq!(surface(&view).layer_ids().len(), layers);
    }

    #[test]
    fn missing_container_can_be_retried() {
        let mut view: MapView<HeadlessSurface> = MapView::new();
        assert_eq!(view.mount(None), MountOutcome::NoContainer);
        assert!(!view.is_mounted());
        assert_eq!(view.mount(Some(HeadlessSurface::new())), MountOutcome::Mounted);
    }

    #[test]
    fn opening_camera_and_visibility() {
        let view = mounted();
        let s = surface(&view);
        let camera = s.camera().unwrap();
        assert_eq!(camera.center, [77.2090, 28.6139]);
        assert_eq!(camera.pitch, Some(45.0));
        assert_eq!(s.visibility(STATIONS_LAYER), Some(Visibility::Visible));
        assert_eq!(s.visibility(SENSORS_LAYER), Some(Visibility::Hidden));
        assert_eq!(s.visibility(REPORT_POINTS_LAYER), Some(Visibility::Hidden));
    }

    #[test]
    fn repeated_sync_never_re_adds_layers() {
        let mut view = mounted();
        view.surface_mut().unwrap().clear_calls();

        view.set_data(data());
        view.set_data(data());

        assert!(!surface(&view).calls().iter().any(SurfaceCall::is_structural));
        assert_eq!(surface(&view).layer_ids().len(), 7);
    }

    #[test]
    fn pollutant_change_issues_paint_only() {
        let mut view = mounted();
        view.surface_mut().unwrap().clear_calls();

        view.select_pollutant(Pollutant::No2);

        let calls = surface(&view).calls();
        assert_eq!(calls.len(), 2);
        assert!(calls.iter().all(|c| matches!(c, SurfaceCall::SetPaint { .. })));
        assert_eq!(
            surface(&view).paint(STATIONS_LAYER, "circle-color"),
            Some(&serde_json::Value::from(Pollutant::No2.color()))
        );
    }

    #[test]
    fn fire_mode_renders_only_burning_reports() {
        let mut view = mounted();
        view.toggle_layer(OverlayKind::Reports);
        view.set_fire_mode(true);

        let s = surface(&view);
        let rendered = s.rendered_features(REPORT_POINTS_LAYER, 16.0);
        assert_eq!(rendered.len(), 3);
        assert!(
            rendered
                .iter()
                .all(|f| f.properties.as_ref().unwrap()["type"] == "GARBAGE_BURNING")
        );
        assert_eq!(
            s.paint(REPORT_POINTS_LAYER, "circle-color"),
            Some(&serde_json::Value::from(paint::ALERT_COLOR))
        );

        view.set_fire_mode(false);
        assert_eq!(
            surface(&view).rendered_features(REPORT_POINTS_LAYER, 16.0).len(),
            8
        );
    }

    fn rendered_report_total(view: &MapView<HeadlessSurface>, zoom: f64) -> u64 {
        let s = surface(view);
        let clustered: u64 = s
            .rendered_features(REPORT_CLUSTERS_LAYER, zoom)
            .iter()
            .filter_map(|f| f.properties.as_ref()?[crate::clustering::POINT_COUNT].as_u64())
            .sum();
        let singles = s.rendered_features(REPORT_POINTS_LAYER, zoom).len() as u64;
        clustered + singles
    }

    #[test]
    fn fire_mode_at_cluster_zoom_counts_only_burning_reports() {
        let reports: Vec<CitizenReport> = (0..8)
            .map(|i| {
                let report_type = if i < 3 {
                    ReportType::GarbageBurning
                } else {
                    ReportType::IndustrialSmoke
                };
                #[allow(clippy::cast_precision_loss)]
                let offset = i as f64 * 0.0005;
                CitizenReport {
                    location: Coordinates::new(28.61 + offset, 77.21 + offset),
                    ..report(i, report_type)
                }
            })
            .collect();

        let mut view = mounted();
        view.set_data(DashboardResponse {
            reports,
            ..data()
        });
        view.toggle_layer(OverlayKind::Reports);

        assert!(!surface(&view).rendered_features(REPORT_CLUSTERS_LAYER, 11.0).is_empty());
        assert_eq!(rendered_report_total(&view, 11.0), 8);

        view.set_fire_mode(true);
        assert_eq!(rendered_report_total(&view, 11.0), 3);
        assert_eq!(
            surface(&view).paint(REPORT_CLUSTERS_LAYER, "circle-color"),
            Some(&serde_json::Value::from(paint::ALERT_COLOR))
        );
    }

    #[test]
    fn region_selection_flies_to_preset() {
        let mut view = mounted();
        view.select_region(Region::Punjab);
        let camera = surface(&view).camera().unwrap();
        assert_eq!(camera.center, [75.8573, 31.0000]);
        assert!((camera.zoom - 8.5).abs() < f64::EPSILON);
        assert_eq!(camera.pitch, Some(REGION_PITCH));
    }

    #[test]
    fn only_one_popup_at_a_time() {
        let mut view = mounted();
        let stations = surface(&view).rendered_features(STATIONS_LAYER, 11.0);

        view.hover(STATIONS_LAYER, &stations[0], [0.0, 0.0]);
        view.hover(STATIONS_LAYER, &stations[1], [0.0, 0.0]);

        let s = surface(&view);
        let shows = s.calls().iter().filter(|c| **c == SurfaceCall::ShowPopup).count();
        let removes = s.calls().iter().filter(|c| **c == SurfaceCall::RemovePopup).count();
        assert_eq!(shows - removes, 1);
        assert_eq!(s.popup().unwrap().content.title, "Station b");

        view.leave();
        assert!(surface(&view).popup().is_none());
    }

    #[test]
    fn source_markers_are_torn_down_and_recreated() {
        let mut view = mounted();
        assert_eq!(view.marker_count(), 0);

        view.toggle_source_category(SourceCategory::BrickConstructionMaterials);
        view.toggle_source_category(SourceCategory::PowerEnergy);
        assert_eq!(surface(&view).markers().len(), 2);

        view.surface_mut().unwrap().clear_calls();
        view.toggle_source_category(SourceCategory::PowerEnergy);

        let calls = surface(&view).calls();
        let removed = calls
            .iter()
            .filter(|c| matches!(c, SurfaceCall::RemoveMarker(_)))
            .count();
        let added = calls
            .iter()
            .filter(|c| matches!(c, SurfaceCall::AddMarker(_)))
            .count();
        assert_eq!((removed, added), (2, 1));
        assert_eq!(surface(&view).markers().len(), 1);
        assert_eq!(surface(&view).markers()[0].color, "#78350f");
    }

    #[tokio::test]
    async fn geolocation_denial_raises_an_alert() {
        let mut view = mounted();
        let result = view
            .use_my_location(&FixedGeolocator(Err(GeolocationError::Denied)))
            .await;

        assert_eq!(result, Err(GeolocationError::Denied));
        assert_eq!(view.alert().unwrap().message, "Location permission denied");
        view.dismiss_alert();
        assert!(view.alert().is_none());
    }

    #[tokio::test]
    async fn location_fix_checks_nearest_station() {
        let mut view = mounted();
        let fix = view
            .use_my_location(&FixedGeolocator(Ok(Coordinates::new(28.64, 77.30))))
            .await
            .unwrap();

        let safety = fix.safety.unwrap();
        assert_eq!(safety.station_id, "a");
        assert!(!safety.status.is_safe);
        assert!(!fix.captured_for_report);
        let camera = surface(&view).camera().unwrap();
        assert!((camera.zoom - LOCATE_ZOOM).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn location_fix_in_placement_mode_opens_the_form() {
        let mut view = mounted();
        assert_eq!(
            view.begin_report_placement(false),
            PlacementStart::SignInRequired
        );
        assert_eq!(view.begin_report_placement(true), PlacementStart::Placing);

        let here = Coordinates::new(28.6, 77.2);
        let fix = view
            .use_my_location(&FixedGeolocator(Ok(here)))
            .await
            .unwrap();

        assert!(fix.captured_for_report);
        assert!(!view.is_placing_report());
        let form = view.report_form().unwrap();
        assert_eq!(form.location(), here);
        assert_eq!(*form.state(), FormState::Editing);
        let pins: Vec<_> = surface(&view)
            .markers()
            .into_iter()
            .filter(|m| m.color == paint::PIN_COLOR)
            .collect();
        assert_eq!(pins.len(), 1);

        view.close_report_form();
        assert!(surface(&view).markers().is_empty());
    }
}
