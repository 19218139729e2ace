//! Live feed diagnostics.

use air_map_air_models::Region;
use air_map_source::{LiveFeedConfig, StationFeed as _, WaqiFeed, waqi_feed};

/// The configured WAQI feed, or `None` when no token is set.
///
/// # Errors
///
/// * If a token is set but the feed cannot be built from it
pub fn configured_feed(
    http: reqwest::Client,
) -> Result<Option<WaqiFeed>, air_map_source::SourceError> {
    let config = LiveFeedConfig::from_env(waqi_feed());
    if !config.is_enabled() {
        return Ok(None);
    }
    WaqiFeed::from_config(http, &config).map(Some)
}

/// Queries every region separately and prints what came back.
///
/// Unlike the page loader, a failing region does not hide the others.
///
/// # Errors
///
/// * If the feed cannot be built from the configured token
pub async fn check() -> Result<(), Box<dyn std::error::Error>> {
    let Some(feed) = configured_feed(reqwest::Client::new())? else {
        println!(
            "Live feed disabled: set {} to enable it.",
            waqi_feed().token_env
        );
        return Ok(());
    };

    println!("Checking live feed {}...", feed.id());
    for region in Region::all() {
        match feed.fetch_region(*region).await {
            Ok(stations) => println!("{:<10} {} station(s)", region.to_string(), stations.len()),
            Err(e) => println!("{:<10} failed: {e}", region.to_string()),
        }
    }

    Ok(())
}
