//! Region presets loaded from embedded TOML configs.
//!
//! Each `.toml` file in `packages/geography/regions/` is baked into the
//! binary at compile time via [`include_str!`]. A preset carries the camera
//! target the map flies to, the keyword used to search the live station
//! feed, and the hotspots simulated reports are scattered around.

use air_map_air_models::Region;
use air_map_geography_models::Coordinates;
use serde::Deserialize;
use thiserror::Error;

/// Camera pitch, in degrees, used for every region fly-to.
pub const REGION_PITCH: f64 = 45.0;

/// TOML configs embedded at compile time.
const REGION_TOMLS: &[(&str, &str)] = &[
    ("delhi", include_str!("../regions/delhi.toml")),
    ("haryana", include_str!("../regions/haryana.toml")),
    ("punjab", include_str!("../regions/punjab.toml")),
];

/// Errors from parsing a region config.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The TOML could not be deserialized.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The config parsed but is unusable.
    #[error("Invalid region {id}: {message}")]
    Invalid {
        /// Region the config claims to describe.
        id: Region,
        /// What is wrong with it.
        message: String,
    },
}

/// Camera and data-placement settings for one region.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegionPreset {
    /// Which region this preset describes.
    pub id: Region,
    /// Display label.
    pub label: String,
    /// Camera target as `[lng, lat]`.
    pub center: [f64; 2],
    /// Camera zoom level.
    pub zoom: f64,
    /// Keyword sent to the live station search.
    pub feed_keyword: String,
    /// Hotspots, as `[lng, lat]`, that simulated reports cluster around.
    pub report_centers: Vec<[f64; 2]>,
}

impl RegionPreset {
    /// The camera target as coordinates.
    #[must_use]
    pub const fn center_coordinates(&self) -> Coordinates {
        Coordinates::new(self.center[1], self.center[0])
    }

    /// Report hotspots as coordinates.
    pub fn report_center_coordinates(&self) -> impl Iterator<Item = Coordinates> + '_ {
        self.report_centers
            .iter()
            .map(|[lng, lat]| Coordinates::new(*lat, *lng))
    }
}

/// Parses a region preset from TOML.
///
/// # Errors
///
/// * [`RegistryError::Toml`] if the TOML is malformed
/// * [`RegistryError::Invalid`] if the preset has no report centres
pub fn parse_region_toml(text: &str) -> Result<RegionPreset, RegistryError> {
    let preset: RegionPreset = toml::from_str(text)?;

    if preset.report_centers.is_empty() {
        return Err(RegistryError::Invalid {
            id: preset.id,
            message: "at least one report centre is required".to_string(),
        });
    }

    Ok(preset)
}

/// Returns every configured region preset, in [`Region::all`] order.
///
/// # Panics
///
/// Panics if any TOML config is malformed (this is a compile-time guarantee
/// since the configs are embedded).
#[must_use]
pub fn all_regions() -> Vec<RegionPreset> {
    let mut presets: Vec<RegionPreset> = REGION_TOMLS
        .iter()
        .map(|(name, toml)| {
            parse_region_toml(toml).unwrap_or_else(|e| panic!("Failed to parse {name}.toml: {e}"))
        })
        .collect();
    presets.sort_by_key(|p| p.id);
    presets
}

/// Returns the preset for one region.
///
/// # Panics
///
/// Panics if the embedded configs do not cover `region`.
#[must_use]
pub fn preset(region: Region) -> RegionPreset {
    all_regions()
        .into_iter()
        .find(|p| p.id == region)
        .unwrap_or_else(|| panic!("No preset configured for region {region}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_region_has_exactly_one_preset() {
        let presets = all_regions();
        assert_eq!(presets.len(), Region::all().len());
        for (preset, region) in presets.iter().zip(Region::all()) {
            assert_eq!(preset.id, *region);
        }
    }

    #[test]
    fn camera_targets_match_dashboard_defaults() {
        let delhi = preset(Region::Delhi);
        assert_eq!(delhi.center, [77.2090, 28.6139]);
        assert!((delhi.zoom - 11.0).abs() < f64::EPSILON);

        let haryana = preset(Region::Haryana);
        assert_eq!(haryana.center, [77.0266, 28.9000]);
        assert!((haryana.zoom - 9.0).abs() < f64::EPSILON);

        let punjab = preset(Region::Punjab);
        assert_eq!(punjab.center, [75.8573, 31.0000]);
        assert!((punjab.zoom - 8.5).abs() < f64::EPSILON);
    }

    #[test]
    fn feed_keywords_are_region_names() {
        for preset in all_regions() {
            assert_eq!(preset.feed_keyword, preset.id.to_string());
        }
    }

    #[test]
    fn report_centres_lie_in_service_area() {
        for preset in all_regions() {
            for c in preset.report_center_coordinates() {
                assert!(
                    air_map_geography_models::SERVICE_AREA.contains(c),
                    "{}: {c:?}",
                    preset.label
                );
            }
        }
    }

    #[test]
    fn rejects_preset_without_report_centres() {
        let text = r#"
id = "Delhi"
label = "Delhi"
center = [77.2, 28.6]
zoom = 11.0
feed_keyword = "Delhi"
report_centers = []
"#;
        assert!(matches!(
            parse_region_toml(text),
            Err(RegistryError::Invalid { .. })
        ));
    }

    #[test]
    fn rejects_unknown_region_id() {
        let text = r#"
id = "Goa"
label = "Goa"
center = [73.8, 15.3]
zoom = 9.0
feed_keyword = "Goa"
report_centers = [[73.8, 15.3]]
"#;
        assert!(matches!(parse_region_toml(text), Err(RegistryError::Toml(_))));
    }
}
