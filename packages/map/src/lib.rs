#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Map state and layer composition for the air-quality dashboard.
//!
//! [`MapView`] owns a [`MapSurface`] (the rendering engine behind a narrow
//! trait) and keeps five overlay families in step with the loaded data:
//! stations, citizen sensors, clustered citizen reports, mock satellite
//! footprints and mock traffic corridors. Pollution sources are drawn as
//! standalone markers. [`HeadlessSurface`] implements the surface in memory
//! and answers which features a layer would render.
//!
//! The [`panel`] and [`report_form`] modules hold the command panel and the
//! incident report form that drive the view.

pub mod clustering;
pub mod features;
pub mod geolocation;
pub mod headless;
pub mod markers;
pub mod overlays;
pub mod paint;
pub mod panel;
pub mod popup;
pub mod report_form;
pub mod surface;
pub mod view;

pub use geolocation::{GeolocationError, Geolocator};
pub use headless::HeadlessSurface;
pub use overlays::{LayerToggle, OverlayKind};
pub use panel::{CommandPanel, PanelAction, PanelEffect};
pub use report_form::{HttpReportSubmitter, ReportForm, ReportSubmitter, SubmitError};
pub use surface::MapSurface;
pub use view::{MapView, MountOutcome};
