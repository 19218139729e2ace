//! Page loader: assembles what the dashboard shows for one range.
//!
//! Stations come from the live feed only for the live range and only when
//! a feed is configured. A failed or empty live fetch falls back to
//! simulated stations, each tagged with [`SIM_SUFFIX`]. Everything else is
//! simulated, apart from reports, which are read from the store first.

use air_map_air_models::{CitizenReport, Region, Station, TimeRange};
use air_map_database::reports::{recent_reports, to_citizen_report};
use air_map_database_models::RECENT_REPORTS_LIMIT;
use air_map_server_models::DashboardResponse;
use air_map_simulation::{
    DEFAULT_REPORT_COUNT, DEFAULT_SENSOR_COUNT, generate_pollution_sources, generate_reports,
    generate_sensors, satellite_layers, traffic_layers,
};
use air_map_source::{StationFeed, fetch_regions};
use switchy_database::Database;

use crate::AppState;

/// Appended to station names when live data was wanted but unavailable.
pub const SIM_SUFFIX: &str = " (Sim)";

/// Stations plus where they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct StationLoad {
    /// Station readings.
    pub stations: Vec<Station>,
    /// Whether they came from the live feed.
    pub is_live: bool,
}

/// Loads stations for a range, falling back to simulation.
pub async fn load_stations(feed: Option<&dyn StationFeed>, range: TimeRange) -> StationLoad {
    let Some(feed) = feed.filter(|_| range == TimeRange::Live) else {
        return StationLoad {
            stations: air_map_simulation::stations(range),
            is_live: false,
        };
    };

    match fetch_regions(feed, Region::all()).await {
        Ok(stations) if !stations.is_empty() => StationLoad {
            stations,
            is_live: true,
        },
        Ok(_) => {
            log::warn!("Live fetch returned 0 stations, falling back to simulation");
            simulated_fallback(range)
        }
        Err(e) => {
            log::error!("Live fetch failed, falling back to simulation: {e}");
            simulated_fallback(range)
        }
    }
}

fn simulated_fallback(range: TimeRange) -> StationLoad {
    let stations = air_map_simulation::stations(range)
        .into_iter()
        .map(|s| Station {
            name: format!("{}{SIM_SUFFIX}", s.name),
            ..s
        })
        .collect();
    StationLoad {
        stations,
        is_live: false,
    }
}

/// The most recent stored reports, or simulated ones when the store is
/// empty or unreadable.
pub async fn load_reports(db: &dyn Database, range: TimeRange) -> Vec<CitizenReport> {
    let stored = match recent_reports(db, RECENT_REPORTS_LIMIT).await {
        Ok(rows) => rows
            .into_iter()
            .filter_map(|row| {
                to_citizen_report(row)
                    .map_err(|e| log::warn!("Skipping unreadable report: {e}"))
                    .ok()
            })
            .collect(),
        Err(e) => {
            log::error!("Failed to read reports, falling back to simulation: {e}");
            Vec::new()
        }
    };

    if stored.is_empty() {
        generate_reports(&mut rand::thread_rng(), range, DEFAULT_REPORT_COUNT)
    } else {
        stored
    }
}

/// Everything the dashboard needs for one range.
pub async fn load_dashboard(state: &AppState, range: TimeRange) -> DashboardResponse {
    let StationLoad { stations, is_live } = load_stations(state.feed.as_deref(), range).await;
    let reports = load_reports(state.db.as_ref(), range).await;

    let mut rng = rand::thread_rng();
    DashboardResponse {
        stations,
        sensors: generate_sensors(&mut rng, range, DEFAULT_SENSOR_COUNT),
        reports,
        sources: generate_pollution_sources(&mut rng),
        satellite: satellite_layers(),
        traffic: traffic_layers(&mut rng),
        is_live,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use air_map_source::SourceError;
    use async_trait::async_trait;

    use super::*;

    struct ScriptedFeed {
        fail: bool,
        calls: AtomicUsize,
    }

    impl ScriptedFeed {
        const fn new(fail: bool) -> Self {
            Self {
                fail,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl StationFeed for ScriptedFeed {
        fn id(&self) -> &str {
            "scripted"
        }

        async fn fetch_region(&self, _region: Region) -> Result<Vec<Station>, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(SourceError::Status { status: 503 })
            } else {
                Ok(vec![])
            }
        }
    }

    #[tokio::test]
    async fn no_feed_means_plain_simulation() {
        let load = load_stations(None, TimeRange::Live).await;
        assert!(!load.is_live);
        assert!(!load.stations.is_empty());
        assert!(load.stations.iter().all(|s| !s.name.ends_with(SIM_SUFFIX)));
    }

    #[tokio::test]
    async fn historical_ranges_never_call_the_feed() {
        let feed = ScriptedFeed::new(false);
        let load = load_stations(Some(&feed), TimeRange::Days7).await;
        assert_eq!(feed.calls.load(Ordering::SeqCst), 0);
        assert!(!load.is_live);
    }

    #[tokio::test]
    async fn empty_live_result_falls_back_with_suffix() {
        let feed = ScriptedFeed::new(false);
        let load = load_stations(Some(&feed), TimeRange::Live).await;
        assert_eq!(feed.calls.load(Ordering::SeqCst), Region::all().len());
        assert!(!load.is_live);
        assert!(load.stations.iter().all(|s| s.name.ends_with(SIM_SUFFIX)));
    }

    #[tokio::test]
    async fn failed_live_fetch_falls_back_with_suffix() {
        let feed = ScriptedFeed::new(true);
        let load = load_stations(Some(&feed), TimeRange::Live).await;
        assert!(!load.is_live);
        assert!(load.stations.iter().all(|s| s.name.ends_with(SIM_SUFFIX)));
    }
}
