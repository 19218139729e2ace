#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Live monitoring-station feed.
//!
//! Each provider implements the [`StationFeed`] trait to turn a region into
//! a list of [`Station`] readings. The bundled provider queries the WAQI
//! station search; its endpoint is described by the embedded
//! `feeds/waqi.toml` definition.
//!
//! Callers treat every [`SourceError`] as "live data unavailable" and fall
//! back to simulated stations.

pub mod feed;
pub mod waqi;

use air_map_air_models::{Region, Station};
use async_trait::async_trait;
use futures::future::try_join_all;

pub use feed::{FeedDefinition, LiveFeedConfig, parse_feed_toml, waqi_feed};
pub use waqi::WaqiFeed;

/// Errors that can occur while reading a live feed.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// No API token is configured.
    #[error("Missing API token (set {env})")]
    MissingToken {
        /// Environment variable that should hold the token.
        env: String,
    },

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream answered with a non-success HTTP status.
    #[error("Upstream HTTP status {status}")]
    Status {
        /// Status code returned.
        status: u16,
    },

    /// The upstream answered but reported a failure in its payload.
    #[error("Upstream returned status {status:?}")]
    Upstream {
        /// The `status` field from the payload.
        status: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload did not have the expected shape.
    #[error("Unexpected response: {message}")]
    Shape {
        /// Description of what went wrong.
        message: String,
    },
}

/// A provider of live station readings.
#[async_trait]
pub trait StationFeed: Send + Sync {
    /// Returns a unique identifier for this feed (e.g., `"waqi"`).
    fn id(&self) -> &str;

    /// Fetches the current readings for one region.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the request fails or the response is not
    /// usable.
    async fn fetch_region(&self, region: Region) -> Result<Vec<Station>, SourceError>;
}

/// Fetches every region in parallel and concatenates the results in region
/// order.
///
/// There is no partial-failure isolation: the first failing region fails
/// the whole call.
///
/// # Errors
///
/// Returns the first [`SourceError`] raised by any region.
pub async fn fetch_regions(
    feed: &dyn StationFeed,
    regions: &[Region],
) -> Result<Vec<Station>, SourceError> {
    let per_region = try_join_all(regions.iter().map(|r| feed.fetch_region(*r))).await?;
    let stations: Vec<Station> = per_region.into_iter().flatten().collect();

    log::info!(
        "Fetched {} live stations from {} across {} regions",
        stations.len(),
        feed.id(),
        regions.len()
    );

    Ok(stations)
}

#[cfg(test)]
mod tests {
    use air_map_air_models::StationSource;
    use air_map_geography_models::Coordinates;
    use chrono::Utc;

    use super::*;

    struct FixedFeed {
        fail_on: Option<Region>,
    }

    #[async_trait]
    impl StationFeed for FixedFeed {
        fn id(&self) -> &str {
            "fixed"
        }

        async fn fetch_region(&self, region: Region) -> Result<Vec<Station>, SourceError> {
            if self.fail_on == Some(region) {
                return Err(SourceError::Status { status: 503 });
            }
            Ok(vec![Station {
                id: format!("fixed-{region}"),
                name: region.to_string(),
                location: Coordinates::new(28.6, 77.2),
                aqi: 100,
                pm25: 100,
                pm10: 120,
                no2: 10,
                so2: 5,
                co: 15,
                source: StationSource::Cpcb,
                last_updated: Utc::now(),
            }])
        }
    }

    #[tokio::test]
    async fn concatenates_regions_in_order() {
        let feed = FixedFeed { fail_on: None };
        let stations = fetch_regions(&feed, Region::all()).await.unwrap();
        let ids: Vec<&str> = stations.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["fixed-Delhi", "fixed-Haryana", "fixed-Punjab"]);
    }

    #[tokio::test]
    async fn one_failing_region_fails_everything() {
        let feed = FixedFeed {
            fail_on: Some(Region::Haryana),
        };
        let result = fetch_regions(&feed, Region::all()).await;
        assert!(matches!(result, Err(SourceError::Status { status: 503 })));
    }
}
