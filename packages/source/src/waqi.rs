//! WAQI station search client.
//!
//! Endpoint: <https://api.waqi.info/search/>
//!
//! The search endpoint only reports an overall index per station, so the
//! individual pollutant values are estimated from it.

use air_map_air_models::{Region, Station};
use air_map_geography_models::Coordinates;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};

use crate::{FeedDefinition, LiveFeedConfig, SourceError, StationFeed};

/// Live stations from the WAQI search API.
pub struct WaqiFeed {
    client: reqwest::Client,
    definition: FeedDefinition,
    token: String,
}

impl WaqiFeed {
    /// Creates a feed from a definition and token.
    #[must_use]
    pub const fn new(client: reqwest::Client, definition: FeedDefinition, token: String) -> Self {
        Self {
            client,
            definition,
            token,
        }
    }

    /// Creates a feed from runtime config.
    ///
    /// # Errors
    ///
    /// * [`SourceError::MissingToken`] if the config carries no token
    pub fn from_config(client: reqwest::Client, config: &LiveFeedConfig) -> Result<Self, SourceError> {
        let token = config
            .token
            .clone()
            .ok_or_else(|| SourceError::MissingToken {
                env: config.definition.token_env.clone(),
            })?;

        Ok(Self::new(client, config.definition.clone(), token))
    }
}

#[async_trait]
impl StationFeed for WaqiFeed {
    fn id(&self) -> &str {
        &self.definition.id
    }

    async fn fetch_region(&self, region: Region) -> Result<Vec<Station>, SourceError> {
        let keyword = air_map_geography::preset(region).feed_keyword;

        log::debug!("Fetching {} stations for {keyword}", self.definition.id);
        let response = self
            .client
            .get(&self.definition.base_url)
            .query(&[("keyword", keyword.as_str()), ("token", self.token.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            log::error!(
                "{} returned HTTP {} for {keyword}",
                self.definition.id,
                response.status()
            );
            return Err(SourceError::Status {
                status: response.status().as_u16(),
            });
        }

        let body: serde_json::Value = response.json().await?;
        let stations = parse_response(&body, &self.definition)?;

        log::debug!("{keyword}: {} usable stations", stations.len());
        Ok(stations)
    }
}

/// Parses a WAQI search payload into stations.
///
/// Entries without a two-element `geo` array or with a non-numeric `aqi`
/// (WAQI sends `"-"` for offline stations) are skipped.
///
/// # Errors
///
/// * [`SourceError::Upstream`] if `status` is not `"ok"`
/// * [`SourceError::Shape`] if `data` is missing or not an array
pub fn parse_response(
    body: &serde_json::Value,
    definition: &FeedDefinition,
) -> Result<Vec<Station>, SourceError> {
    let status = body["status"].as_str().unwrap_or_default();
    if status != "ok" {
        return Err(SourceError::Upstream {
            status: status.to_string(),
        });
    }

    let entries = body["data"].as_array().ok_or_else(|| SourceError::Shape {
        message: "missing data array".to_string(),
    })?;

    Ok(entries
        .iter()
        .filter_map(|entry| parse_entry(entry, definition))
        .collect())
}

fn parse_entry(entry: &serde_json::Value, definition: &FeedDefinition) -> Option<Station> {
    let aqi = parse_aqi(&entry["aqi"])?;

    let geo = entry["station"]["geo"].as_array()?;
    let [lat, lng] = geo.as_slice() else {
        return None;
    };
    let location = Coordinates::new(lat.as_f64()?, lng.as_f64()?);

    let uid = match &entry["uid"] {
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => s.clone(),
        _ => return None,
    };

    let name = entry["station"]["name"]
        .as_str()
        .unwrap_or_default()
        .to_string();

    Some(Station {
        id: format!("{}-{uid}", definition.id_prefix),
        name,
        location,
        aqi,
        pm25: aqi,
        pm10: estimate(aqi, 1.2),
        no2: estimate(aqi, 0.1),
        so2: estimate(aqi, 0.05),
        co: estimate(aqi, 0.15),
        source: definition.station_source,
        last_updated: parse_time(&entry["time"]).unwrap_or_else(Utc::now),
    })
}

/// Accepts numeric strings (`"152"`) and plain numbers.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_aqi(value: &serde_json::Value) -> Option<u32> {
    let aqi = match value {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    (aqi.is_finite() && aqi >= 0.0).then_some(aqi.round() as u32)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn estimate(aqi: u32, factor: f64) -> u32 {
    (f64::from(aqi) * factor).round() as u32
}

/// Reads `time.stime` + `time.tz` (e.g. `"2024-11-02 14:00:00"`,
/// `"+05:30"`).
fn parse_time(time: &serde_json::Value) -> Option<DateTime<Utc>> {
    let stime = time["stime"].as_str()?;

    match time["tz"].as_str() {
        Some(tz) => DateTime::parse_from_str(&format!("{stime}{tz}"), "%Y-%m-%d %H:%M:%S%:z")
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        None => NaiveDateTime::parse_from_str(stime, "%Y-%m-%d %H:%M:%S")
            .ok()
            .map(|dt| dt.and_utc()),
    }
}

#[cfg(test)]
mod tests {
    use air_map_air_models::StationSource;
    use chrono::{Datelike as _, Timelike as _};

    use super::*;
    use crate::waqi_feed;

    fn sample() -> serde_json::Value {
        serde_json::json!({
            "status": "ok",
            "data": [
                {
                    "uid": 2553,
                    "aqi": "152",
                    "time": { "stime": "2024-11-02 14:00:00", "tz": "+05:30", "vtime": 1_730_536_200 },
                    "station": { "name": "Anand Vihar, Delhi", "geo": [28.6469, 77.316], "url": "delhi/anand-vihar" }
                },
                {
                    "uid": 9999,
                    "aqi": "-",
                    "time": { "stime": "2024-11-02 14:00:00", "tz": "+05:30" },
                    "station": { "name": "Offline", "geo": [28.5, 77.1] }
                },
                {
                    "uid": 8888,
                    "aqi": "80",
                    "station": { "name": "No geo", "geo": [] }
                },
                {
                    "uid": 7777,
                    "aqi": 61,
                    "station": { "name": "Numeric AQI", "geo": [30.9, 75.85] }
                }
            ]
        })
    }

    #[test]
    fn parses_usable_entries_and_skips_the_rest() {
        let stations = parse_response(&sample(), &waqi_feed()).unwrap();
        let ids: Vec<&str> = stations.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["waqi-2553", "waqi-7777"]);
    }

    #[test]
    fn estimates_pollutants_from_index() {
        let stations = parse_response(&sample(), &waqi_feed()).unwrap();
        let s = &stations[0];

        assert_eq!(s.aqi, 152);
        assert_eq!(s.pm25, 152);
        assert_eq!(s.pm10, 182);
        assert_eq!(s.no2, 15);
        assert_eq!(s.so2, 8);
        assert_eq!(s.co, 23);
        assert_eq!(s.source, StationSource::Cpcb);
        assert_eq!(s.name, "Anand Vihar, Delhi");
        assert!((s.location.lat - 28.6469).abs() < 1e-9);
        assert!((s.location.lng - 77.316).abs() < 1e-9);
    }

    #[test]
    fn converts_station_time_to_utc() {
        let stations = parse_response(&sample(), &waqi_feed()).unwrap();
        let t = stations[0].last_updated;
        assert_eq!((t.year(), t.month(), t.day()), (2024, 11, 2));
        assert_eq!((t.hour(), t.minute()), (8, 30));
    }

    #[test]
    fn non_ok_status_is_an_error() {
        let body = serde_json::json!({ "status": "error", "data": "Invalid key" });
        assert!(matches!(
            parse_response(&body, &waqi_feed()),
            Err(SourceError::Upstream { status }) if status == "error"
        ));
    }

    #[test]
    fn missing_data_array_is_an_error() {
        let body = serde_json::json!({ "status": "ok" });
        assert!(matches!(
            parse_response(&body, &waqi_feed()),
            Err(SourceError::Shape { .. })
        ));
    }

    #[test]
    fn empty_result_parses_to_no_stations() {
        let body = serde_json::json!({ "status": "ok", "data": [] });
        assert!(parse_response(&body, &waqi_feed()).unwrap().is_empty());
    }

    #[test]
    fn from_config_requires_token() {
        let config = LiveFeedConfig {
            definition: waqi_feed(),
            token: None,
        };
        assert!(matches!(
            WaqiFeed::from_config(reqwest::Client::new(), &config),
            Err(SourceError::MissingToken { .. })
        ));
    }
}
