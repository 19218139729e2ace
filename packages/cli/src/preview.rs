//! Text preview of what the dashboard would show.

use std::fmt::Write as _;

use air_map_air_models::{CitizenReport, TimeRange, aqi_status};
use air_map_map::panel::{active_fires, average_aqi};
use air_map_server::loader::{StationLoad, load_reports, load_stations};
use air_map_source::StationFeed;
use dialoguer::Select;
use switchy_database::Database;

use crate::feed::configured_feed;

/// Stations listed under "Worst stations".
const WORST_STATIONS: usize = 5;

/// Renders the headline numbers for a range.
#[must_use]
pub fn summarize(range: TimeRange, load: &StationLoad, reports: &[CitizenReport]) -> String {
    let mut out = String::new();
    let origin = if load.is_live { "live" } else { "simulated" };
    let average = average_aqi(&load.stations);

    let _ = writeln!(out, "{} ({origin})", range.label());
    let _ = writeln!(
        out,
        "Stations: {}, average AQI {average} ({})",
        load.stations.len(),
        aqi_status(average).label
    );
    let _ = writeln!(
        out,
        "Reports: {}, active fires {}",
        reports.len(),
        active_fires(reports)
    );

    let mut worst: Vec<_> = load.stations.iter().collect();
    worst.sort_by(|a, b| b.aqi.cmp(&a.aqi));

    let _ = writeln!(out, "Worst stations:");
    for station in worst.into_iter().take(WORST_STATIONS) {
        let _ = writeln!(
            out,
            "  {:<40} {:>4} {}",
            station.name,
            station.aqi,
            aqi_status(station.aqi).label
        );
    }

    out
}

/// Loads stations and reports for `range` the way the server does and
/// prints a summary.
///
/// # Errors
///
/// * If a configured feed token cannot be used
pub async fn run(db: &dyn Database, range: TimeRange) -> Result<(), Box<dyn std::error::Error>> {
    let feed = configured_feed(reqwest::Client::new())?;
    let load = load_stations(feed.as_ref().map(|f| f as &dyn StationFeed), range).await;
    let reports = load_reports(db, range).await;

    print!("{}", summarize(range, &load, &reports));
    Ok(())
}

/// Prompts for a range, then previews it.
///
/// # Errors
///
/// * If the prompt fails or a configured feed token cannot be used
pub async fn interactive(db: &dyn Database) -> Result<(), Box<dyn std::error::Error>> {
    let labels: Vec<&str> = TimeRange::all().iter().map(|r| r.label()).collect();
    let idx = Select::new()
        .with_prompt("Time range")
        .items(&labels)
        .default(0)
        .interact()?;

    run(db, TimeRange::all()[idx]).await
}

#[cfg(test)]
mod tests {
    use air_map_air_models::{ReportStatus, ReportType, Severity, Station, StationSource};
    use air_map_geography_models::Coordinates;
    use chrono::Utc;

    use super::*;

    fn station(name: &str, aqi: u32) -> Station {
        Station {
            id: name.to_lowercase(),
            name: name.to_string(),
            location: Coordinates::new(28.6, 77.2),
            aqi,
            pm25: aqi,
            pm10: aqi,
            no2: 10,
            so2: 5,
            co: 10,
            source: StationSource::Cpcb,
            last_updated: Utc::now(),
        }
    }

    fn report(report_type: ReportType) -> CitizenReport {
        CitizenReport {
            id: "r".to_string(),
            report_type,
            severity: Severity::clamped(3),
            location: Coordinates::new(28.6, 77.2),
            timestamp: Utc::now(),
            status: ReportStatus::Pending,
            description: None,
        }
    }

    #[test]
    fn summary_orders_worst_stations_first() {
        let load = StationLoad {
            stations: vec![station("Lodhi", 90), station("Anand Vihar", 420)],
            is_live: false,
        };
        let reports = [
            report(ReportType::GarbageBurning),
            report(ReportType::TrafficCongestion),
        ];

        let text = summarize(TimeRange::Live, &load, &reports);
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].ends_with("(simulated)"));
        assert_eq!(lines[1], "Stations: 2, average AQI 255 (Very Unhealthy)");
        assert_eq!(lines[2], "Reports: 2, active fires 1");
        assert!(lines[4].contains("Anand Vihar"));
        assert!(lines[5].contains("Lodhi"));
    }
}
