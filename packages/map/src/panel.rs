//! The command panel.
//!
//! Holds only presentational state (the selected range and whether the
//! panel is collapsed). Everything that touches the map goes through
//! [`MapView`]; a range change is handed back to the page loader as a
//! [`PanelEffect`].

use air_map_air_models::{CitizenReport, Pollutant, Region, SourceCategory, Station, TimeRange};
use air_map_forecast::{ChartPoint, DEFAULT_HORIZON, Forecaster, forecast_chart};
use rand::Rng;

use crate::{overlays::OverlayKind, surface::MapSurface, view::MapView};

/// A user action on the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    /// Pick a region preset.
    SelectRegion(Region),
    /// Pick the pollutant stations are colored by.
    SelectPollutant(Pollutant),
    /// Pick a time window.
    SetRange(TimeRange),
    /// Flip an overlay family.
    ToggleLayer(OverlayKind),
    /// Turn fire mode on or off.
    SetFireMode(bool),
    /// Flip a source category's markers.
    ToggleSourceCategory(SourceCategory),
    /// Collapse or expand the panel.
    SetCollapsed(bool),
}

/// Work the panel asks its owner to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEffect {
    /// Reload dashboard data for a new range.
    Reload(TimeRange),
}

/// Summary figures shown at the top of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelStats {
    /// Mean station AQI, rounded.
    pub average_aqi: u32,
    /// Burning reports currently loaded.
    pub active_fires: usize,
    /// Whether stations came from the live feed.
    pub is_live: bool,
}

/// Mean AQI over stations, rounded. Zero when there are none.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn average_aqi(stations: &[Station]) -> u32 {
    let total: u64 = stations.iter().map(|s| u64::from(s.aqi)).sum();
    (total as f64 / stations.len().max(1) as f64).round() as u32
}

/// Number of burning reports.
#[must_use]
pub fn active_fires(reports: &[CitizenReport]) -> usize {
    reports.iter().filter(|r| r.report_type.is_burning()).count()
}

/// Command panel state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandPanel {
    range: TimeRange,
    collapsed: bool,
}

impl CommandPanel {
    /// Creates a panel showing `range`.
    #[must_use]
    pub const fn new(range: TimeRange) -> Self {
        Self {
            range,
            collapsed: false,
        }
    }

    /// Selected range.
    #[must_use]
    pub const fn range(&self) -> TimeRange {
        self.range
    }

    /// Whether the panel is collapsed.
    #[must_use]
    pub const fn collapsed(&self) -> bool {
        self.collapsed
    }

    /// Applies an action, delegating map changes to the view.
    pub fn dispatch<S: MapSurface>(
        &mut self,
        view: &mut MapView<S>,
        action: PanelAction,
    ) -> Option<PanelEffect> {
        match action {
            PanelAction::SelectRegion(region) => view.select_region(region),
            PanelAction::SelectPollutant(pollutant) => view.select_pollutant(pollutant),
            PanelAction::SetRange(range) => {
                if range == self.range {
                    return None;
                }
                self.range = range;
                return Some(PanelEffect::Reload(range));
            }
            PanelAction::ToggleLayer(kind) => view.toggle_layer(kind),
            PanelAction::SetFireMode(on) => view.set_fire_mode(on),
            PanelAction::ToggleSourceCategory(category) => view.toggle_source_category(category),
            PanelAction::SetCollapsed(collapsed) => self.collapsed = collapsed,
        }
        None
    }

    /// Summary figures for the view's current data.
    #[must_use]
    pub fn stats<S: MapSurface>(view: &MapView<S>) -> PanelStats {
        let data = view.data();
        PanelStats {
            average_aqi: average_aqi(&data.stations),
            active_fires: active_fires(&data.reports),
            is_live: data.is_live,
        }
    }

    /// Chart series starting from the current average AQI.
    pub fn chart<S: MapSurface>(
        view: &MapView<S>,
        rng: &mut impl Rng,
        forecaster: &dyn Forecaster,
    ) -> Vec<ChartPoint> {
        forecast_chart(
            rng,
            forecaster,
            average_aqi(&view.data().stations),
            DEFAULT_HORIZON,
        )
    }
}
