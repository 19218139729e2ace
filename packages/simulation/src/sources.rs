//! Pollution-source annotations.

use air_map_air_models::{PollutionSource, SourceCategory};
use air_map_geography::{all_regions, sampling::point_in_disk};
use air_map_geography_models::Coordinates;
use rand::Rng;

/// Sources are placed within this distance of a region hotspot.
const SOURCE_RADIUS_KM: f64 = 8.0;

/// Generates one source per category sub-type, each near a randomly chosen
/// region hotspot and labelled with that region.
pub fn generate_pollution_sources(rng: &mut impl Rng) -> Vec<PollutionSource> {
    let regions = all_regions();
    let mut sources = Vec::new();

    for category in SourceCategory::all() {
        for sub_type in category.sub_types() {
            let region = &regions[rng.gen_range(0..regions.len())];
            let centers = &region.report_centers;
            let [lng, lat] = centers[rng.gen_range(0..centers.len())];
            let center = Coordinates::new(lat, lng);

            sources.push(PollutionSource {
                id: format!("src-{}", sources.len() + 1),
                name: format!("{sub_type}, {}", region.label),
                category: *category,
                sub_type: (*sub_type).to_string(),
                location: point_in_disk(rng, center, SOURCE_RADIUS_KM),
            });
        }
    }

    sources
}
